use thiserror::Error;

use crate::job::id::JobId;
use crate::job::state::KILL_TOKEN;

/// Why a line of command output couldn't be read
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LineError {
    #[error("no '.' between job id and state")]
    MissingSeparator,
    #[error("unsupported job id {0:?}")]
    UnsupportedJobId(String),
    #[error("expected <command>:<path>:<message>")]
    MissingFields,
}

/// A statefile name, `<job_id>.<token>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatefileName {
    pub job_id: JobId,
    pub token: String,
}

impl StatefileName {
    /// Split at the last `.`, the token never contains one and a valid job id can't either
    pub fn parse(line: &str) -> Result<Self, LineError> {
        let (id, token) = line
            .trim()
            .rsplit_once('.')
            .ok_or(LineError::MissingSeparator)?;
        let job_id = JobId::new(id).map_err(|_| LineError::UnsupportedJobId(id.to_string()))?;

        Ok(StatefileName {
            job_id,
            token: token.to_string(),
        })
    }

    pub fn is_kill_marker(&self) -> bool {
        self.token == KILL_TOKEN
    }
}

/// A shell error line, `<command>:<path>:<message>`
///
/// Shells may put their own location in front (`bash: line 1: cd: /tmp/x: No such file or
/// directory`), so the last three fields are used. A colon inside the path or the message still
/// misparses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLine {
    pub command: String,
    pub path: String,
    pub message: String,
}

impl ErrorLine {
    pub fn parse(line: &str) -> Result<Self, LineError> {
        let mut fields = line.rsplitn(3, ':');
        let (message, path, rest) = match (fields.next(), fields.next(), fields.next()) {
            (Some(message), Some(path), Some(rest)) => (message, path, rest),
            _ => return Err(LineError::MissingFields),
        };
        let command = rest.rsplit(':').next().unwrap_or(rest);

        Ok(ErrorLine {
            command: command.trim().to_string(),
            path: unquote_path(path).to_string(),
            message: message.trim().to_string(),
        })
    }
}

/// GNU ls says `cannot access 'j1.DONE'`, BSD ls just names the file
fn unquote_path(path: &str) -> &str {
    let path = path.trim();
    let path = path.strip_prefix("cannot access ").unwrap_or(path);
    ['\'', '"']
        .iter()
        .find_map(|quote| {
            path.strip_prefix(*quote)
                .and_then(|inner| inner.strip_suffix(*quote))
        })
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statefile_name_splits_at_last_dot() {
        let name = StatefileName::parse("j1.QUEUED_HELD").unwrap();
        assert_eq!(name.job_id.as_str(), "j1");
        assert_eq!(name.token, "QUEUED_HELD");
        assert!(!name.is_kill_marker());

        assert!(StatefileName::parse("j1.KILL").unwrap().is_kill_marker());
    }

    #[test]
    fn statefile_name_rejects_malformed_lines() {
        assert_eq!(
            StatefileName::parse("README"),
            Err(LineError::MissingSeparator)
        );
        assert_eq!(
            StatefileName::parse("calc.1.DONE"),
            Err(LineError::UnsupportedJobId("calc.1".to_string()))
        );
        assert_eq!(
            StatefileName::parse(".QUEUED"),
            Err(LineError::UnsupportedJobId(String::new()))
        );
    }

    #[test]
    fn plain_error_line() {
        let line = ErrorLine::parse("cd:/no/such/dir:No such file or directory").unwrap();
        assert_eq!(line.command, "cd");
        assert_eq!(line.path, "/no/such/dir");
        assert_eq!(line.message, "No such file or directory");
    }

    #[test]
    fn bash_prefixed_error_line() {
        let line =
            ErrorLine::parse("bash: line 1: cd: /no/such/dir: No such file or directory").unwrap();
        assert_eq!(line.command, "cd");
        assert_eq!(line.path, "/no/such/dir");
        assert_eq!(line.message, "No such file or directory");
    }

    #[test]
    fn gnu_and_bsd_ls_misses() {
        let gnu = ErrorLine::parse("ls: cannot access 'j1.DONE': No such file or directory").unwrap();
        assert_eq!(gnu.command, "ls");
        assert_eq!(gnu.path, "j1.DONE");

        let bsd = ErrorLine::parse("ls: j1.DONE: No such file or directory").unwrap();
        assert_eq!(bsd.command, "ls");
        assert_eq!(bsd.path, "j1.DONE");
    }

    #[test]
    fn error_line_needs_three_fields() {
        assert_eq!(
            ErrorLine::parse("something went wrong"),
            Err(LineError::MissingFields)
        );
        assert_eq!(ErrorLine::parse("ls:j1.DONE"), Err(LineError::MissingFields));
    }
}
