// User prompt and shell collaborators, with native implementations

/// A blocking yes/no question to the user.
pub trait UserPrompt {
    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Hands a URL to the OS default handler. Fire-and-forget.
pub trait UrlOpener {
    fn open_url(&self, url: &str);
}

/// Native confirmation dialog (Win32 message box; console on other platforms).
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePrompt;

/// Native URL launcher (ShellExecuteW, `open`, or `xdg-open`).
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeShell;

#[cfg(windows)]
impl UserPrompt for NativePrompt {
    fn confirm(&self, title: &str, message: &str) -> bool {
        use windows::core::PCWSTR;
        use windows::Win32::UI::WindowsAndMessaging::{
            MessageBoxW, IDYES, MB_ICONINFORMATION, MB_YESNO,
        };

        let msg_wide = wide_string(message);
        let title_wide = wide_string(title);

        unsafe {
            let result = MessageBoxW(
                None,
                PCWSTR(msg_wide.as_ptr()),
                PCWSTR(title_wide.as_ptr()),
                MB_YESNO | MB_ICONINFORMATION,
            );
            result == IDYES
        }
    }
}

#[cfg(not(windows))]
impl UserPrompt for NativePrompt {
    fn confirm(&self, title: &str, message: &str) -> bool {
        use std::io::{BufRead, Write};

        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "{title}\n\n{message} [y/N] ");
        let _ = stdout.flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

#[cfg(windows)]
impl UrlOpener for NativeShell {
    fn open_url(&self, url: &str) {
        use windows::core::PCWSTR;
        use windows::Win32::UI::Shell::ShellExecuteW;
        use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

        let url_wide = wide_string(url);
        let verb = wide_string("open");
        let result = unsafe {
            ShellExecuteW(
                None,
                PCWSTR(verb.as_ptr()),
                PCWSTR(url_wide.as_ptr()),
                None,
                None,
                SW_SHOWNORMAL,
            )
        };
        // Values up to 32 are error codes
        if (result.0 as isize) <= 32 {
            tracing::warn!(url, code = result.0 as isize, "ShellExecuteW failed");
        }
    }
}

#[cfg(not(windows))]
impl UrlOpener for NativeShell {
    fn open_url(&self, url: &str) {
        #[cfg(target_os = "macos")]
        let opener = "open";
        #[cfg(not(target_os = "macos"))]
        let opener = "xdg-open";

        if let Err(e) = std::process::Command::new(opener).arg(url).spawn() {
            tracing::warn!(url, opener, error = %e, "failed to open URL");
        }
    }
}

#[cfg(windows)]
fn wide_string(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(any(not(windows), test))]
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
