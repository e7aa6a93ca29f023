use crate::error::QuietError;

pub fn get_exit_code(error: &QuietError) -> i32 {
    match error {
        QuietError::InvalidConfig(_)
        | QuietError::ConfigError(_)
        | QuietError::Config(_)
        | QuietError::InvalidArgument(_) => 2,

        QuietError::PathNotReady { .. } => 3,

        QuietError::OperationFailed | QuietError::RetriesExhausted { .. } => 4,

        QuietError::Io(err) if err.kind() == std::io::ErrorKind::PermissionDenied => 13,

        _ => 1,
    }
}
