//! Windows runtime libraries.

use super::RuntimeLibrary;

/// MSVC runtime DLLs the frozen interpreter links against, taken from the
/// build machine's system directory. Order is significant.
pub fn msvc_runtime() -> Vec<RuntimeLibrary> {
    vec![
        RuntimeLibrary::new("msvcp90.dll", r"C:\Windows\System32\msvcp90.dll"),
        RuntimeLibrary::new("msvcr90.dll", r"C:\Windows\System32\msvcr90.dll"),
    ]
}
