use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Host permission to show desktop notifications. Mirrors what the host
/// reports; never assumed ahead of an actual request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Permission {
    /// Not yet requested.
    Default,
    Granted,
    Denied,
}

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Default => write!(f, "not requested"),
            Permission::Granted => write!(f, "granted"),
            Permission::Denied => write!(f, "denied"),
        }
    }
}

/// Capability interface over the host notification system, so the app
/// logic stays testable with a fake.
pub trait NotificationGateway {
    fn permission(&self) -> Permission;

    /// Asks the host for permission and returns the resulting state.
    /// Calling again once granted is a no-op.
    fn request_permission(&mut self) -> Permission;

    /// Fire-and-forget dispatch. Skipped unless permission is granted and
    /// `body` is non-empty; delivery failures stay invisible to callers.
    fn notify(&mut self, body: &str);
}

fn should_dispatch(permission: Permission, body: &str) -> bool {
    permission == Permission::Granted && !body.is_empty()
}

/// Gateway backed by the desktop notification server.
pub struct DesktopNotifier {
    permission: Permission,
}

impl DesktopNotifier {
    pub fn new() -> DesktopNotifier {
        DesktopNotifier {
            permission: Permission::Default,
        }
    }
}

impl NotificationGateway for DesktopNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Permission {
        if self.permission == Permission::Granted {
            return self.permission;
        }

        // The desktop server has no query-without-prompt call, so probe it
        // with a visible confirmation notification.
        self.permission =
            match show_desktop_notification("fitnudge", "Desktop notifications enabled.") {
                Ok(()) => Permission::Granted,
                Err(err) => {
                    log::warn!("notification server rejected the probe: {err}");
                    Permission::Denied
                }
            };

        self.permission
    }

    fn notify(&mut self, body: &str) {
        if !should_dispatch(self.permission, body) {
            return;
        }
        if let Err(err) = show_desktop_notification("Time for exercise!", body) {
            log::warn!("failed to show desktop notification: {err}");
        }
    }
}

fn show_desktop_notification(title: &str, message: &str) -> Result<(), NotificationError> {
    notify_rust::Notification::new()
        .summary(title)
        .body(message)
        .show()?;
    Ok(())
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("failed to show desktop notification: {0}")]
    Show(#[from] notify_rust::error::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_requires_granted_permission_and_a_body() {
        assert!(should_dispatch(Permission::Granted, "Push-ups x10"));
        assert!(!should_dispatch(Permission::Granted, ""));
        assert!(!should_dispatch(Permission::Default, "Push-ups x10"));
        assert!(!should_dispatch(Permission::Denied, "Push-ups x10"));
    }

    #[test]
    fn request_is_idempotent_once_granted() {
        // No probe is sent when permission is already granted.
        let mut notifier = DesktopNotifier {
            permission: Permission::Granted,
        };

        assert_eq!(notifier.request_permission(), Permission::Granted);
        assert_eq!(notifier.permission(), Permission::Granted);
    }

    #[test]
    fn permission_starts_unrequested() {
        assert_eq!(DesktopNotifier::new().permission(), Permission::Default);
    }

    #[test]
    fn permission_displays_in_lowercase() {
        assert_eq!(Permission::Default.to_string(), "not requested");
        assert_eq!(Permission::Granted.to_string(), "granted");
        assert_eq!(Permission::Denied.to_string(), "denied");
    }
}
