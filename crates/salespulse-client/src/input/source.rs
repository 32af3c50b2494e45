use std::fs;
use std::io::{IsTerminal, Read};

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedSource {
    pub kind: SourceKind,
    pub source_ref: Option<String>,
    pub content: String,
}

impl ResolvedSource {
    /// Name used in logs and error data.
    pub fn label(&self) -> &str {
        self.source_ref.as_deref().unwrap_or("stdin")
    }
}

/// Reads an entity document from a file path, or from stdin when the path is `-`.
pub fn resolve_source(path: &str, stdin_override: Option<String>) -> ClientResult<ResolvedSource> {
    if path == "-" {
        let body = read_stdin(stdin_override)?;
        if let Some(content) = body
            && !content.trim().is_empty()
        {
            return Ok(ResolvedSource {
                kind: SourceKind::Stdin,
                source_ref: None,
                content,
            });
        }

        return Err(ClientError::invalid_entity_input(
            "Path `-` means stdin input, but stdin was empty. Pipe JSON/CSV input or pass a file path.",
        ));
    }

    let content = fs::read_to_string(path).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("Could not read entity file `{path}`: {error}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Pass `-` to read the entities from stdin instead.".to_string(),
            ],
        )
    })?;

    Ok(ResolvedSource {
        kind: SourceKind::File,
        source_ref: Some(path.to_string()),
        content,
    })
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    if let Some(value) = stdin_override {
        return Ok(Some(value));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read stdin: {error}"),
                vec![
                    "Retry with an explicit file path argument.".to_string(),
                    "Or rerun with valid stdin content.".to_string(),
                ],
            )
        })?;

    Ok(Some(buffer))
}
