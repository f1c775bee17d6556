//! Reading program text from files or stdin and turning it into a table.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tinytm::{assemble, Config, ProgramLoader, TransitionTable, TuringMachineError};

/// File extension of TinyASM sources; anything else is read as raw table text.
const TINYASM_EXTENSION: &str = "tasm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramSource {
    TinyAsm(String),
    Table(String),
}

impl ProgramSource {
    /// Compiles or loads the source into a table. Loader warnings are logged by the loader.
    pub fn into_table(self, config: &Config) -> Result<TransitionTable, TuringMachineError> {
        match self {
            ProgramSource::TinyAsm(text) => Ok(assemble(&text, config)?.into_iter().collect()),
            ProgramSource::Table(text) => Ok(ProgramLoader::load_program(&text, config).table),
        }
    }
}

/// Reads a program file, choosing the format by extension.
pub fn read_program(path: &Path) -> Result<ProgramSource, TuringMachineError> {
    let content = read_file(path)?;

    if path
        .extension()
        .is_some_and(|ext| ext == TINYASM_EXTENSION)
    {
        Ok(ProgramSource::TinyAsm(content))
    } else {
        Ok(ProgramSource::Table(content))
    }
}

pub fn read_file(path: &Path) -> Result<String, TuringMachineError> {
    fs::read_to_string(path).map_err(|e| {
        TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
    })
}

/// Reads raw table text piped into stdin, e.g. the output of `tinytm asm`.
pub fn read_piped_table() -> Result<Option<ProgramSource>, TuringMachineError> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| TuringMachineError::FileError(format!("Failed to read stdin: {e}")))?;

    Ok(Some(ProgramSource::Table(content)))
}

/// Loads a JSON configuration file, or the defaults when no path is given.
pub fn read_config(path: Option<&Path>) -> Result<Config, TuringMachineError> {
    match path {
        Some(path) => Config::from_json(&read_file(path)?),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_tinyasm_program() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "flip.tasm",
            "state 0:\n  on 1: write 0, move R, goto ACCEPT\n",
        );

        let source = read_program(&path).unwrap();
        assert!(matches!(source, ProgramSource::TinyAsm(_)));

        let table = source.into_table(&Config::default()).unwrap();
        assert_eq!(table.get("0", '1').unwrap().next_state, "A");
    }

    #[test]
    fn test_read_raw_table_program() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "flip.txt", "0 1 A 0 R\nbroken line\n");

        let source = read_program(&path).unwrap();
        assert!(matches!(source, ProgramSource::Table(_)));

        let table = source.into_table(&Config::default()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_invalid_tinyasm_is_an_error() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "bad.tasm", "on 1: write 0, move R, goto 0\n");

        let error = read_program(&path)
            .unwrap()
            .into_table(&Config::default())
            .unwrap_err();
        assert!(matches!(error, TuringMachineError::Assembly(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let error = read_program(&dir.path().join("missing.tasm")).unwrap_err();
        assert!(matches!(error, TuringMachineError::FileError(_)));
    }

    #[test]
    fn test_read_config() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "config.json", r#"{"max_steps": 7}"#);

        assert_eq!(read_config(Some(&path)).unwrap().max_steps, 7);
        assert_eq!(read_config(None).unwrap(), Config::default());
    }
}
