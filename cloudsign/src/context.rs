use cloudsign_core::{Context, OsEnv};
use cloudsign_file_read_tokio::TokioFileRead;

/// Create a context that reads files with tokio and environment variables
/// from the current process.
pub fn default_context() -> Context {
    Context::new().with_file_read(TokioFileRead).with_env(OsEnv)
}
