use std::env;
use std::env::VarError;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Get the path of the JSON snapshot file to read rooms, reservations and timetable entries from
pub fn get_data_file_from_env() -> Result<PathBuf, SetupError> {
    env::var("SLOTPLAN_DATA_FILE")
        .map_err(|e| SetupError::from_env_error(e, "SLOTPLAN_DATA_FILE"))
        .and_then(|v| {
            if v.trim().is_empty() {
                Err(SetupError::EnvVariableInvalid {
                    variable_name: "SLOTPLAN_DATA_FILE",
                    problem: "empty path",
                })
            } else {
                Ok(PathBuf::from(v))
            }
        })
}

#[derive(Debug)]
pub enum SetupError {
    EnvVariableMissing {
        variable_name: &'static str,
    },
    EnvVariableInvalid {
        variable_name: &'static str,
        problem: &'static str,
    },
}

impl SetupError {
    fn from_env_error(error: VarError, variable_name: &'static str) -> Self {
        match error {
            VarError::NotPresent => Self::EnvVariableMissing { variable_name },
            VarError::NotUnicode(_) => Self::EnvVariableInvalid {
                variable_name,
                problem: "no valid unicode",
            },
        }
    }
}

impl Display for SetupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::EnvVariableMissing { variable_name } => {
                write!(f, "Environment variable {} must be defined", variable_name)
            }
            SetupError::EnvVariableInvalid {
                variable_name,
                problem,
            } => write!(
                f,
                "Value of environment variable {} is invalid: {}",
                variable_name, problem
            ),
        }
    }
}
