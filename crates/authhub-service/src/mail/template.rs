//! Plain-text bodies for the notification emails.

use super::mailer::OutboundEmail;

/// Platform name used in subjects and salutations.
pub const PLATFORM_NAME: &str = "AuthHub";

/// Welcome email sent when an account is created.
pub fn welcome(to: &str, name: &str, email: &str, password: &str, login_url: &str) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        subject: format!("Welcome to {PLATFORM_NAME}"),
        body: format!(
            "Hello {name},\n\n\
             Your {PLATFORM_NAME} account has been created.\n\n\
             Username: {email}\n\
             Password: {password}\n\n\
             Sign in at {login_url} and change your password on first use.\n"
        ),
    }
}

/// Recovery email carrying a temporary password.
pub fn recovery(to: &str, name: &str, temporary_password: &str, login_url: &str) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        subject: format!("Password recovery - {PLATFORM_NAME}"),
        body: format!(
            "Hello {name},\n\n\
             A temporary password was generated for your {PLATFORM_NAME} account:\n\n\
             {temporary_password}\n\n\
             Sign in at {login_url}; you will be asked to choose a new password.\n\
             If you did not request this, contact your administrator.\n"
        ),
    }
}

/// Sign-in alert sent after each successful login.
pub fn login_alert(to: &str, name: &str, ip: Option<&str>, user_agent: Option<&str>) -> OutboundEmail {
    let origin = match (ip, user_agent) {
        (Some(ip), Some(agent)) => format!("from {ip} ({agent})"),
        (Some(ip), None) => format!("from {ip}"),
        (None, Some(agent)) => format!("from {agent}"),
        (None, None) => "from an unknown client".to_string(),
    };
    OutboundEmail {
        to: to.to_string(),
        subject: format!("New sign-in to your {PLATFORM_NAME} account"),
        body: format!(
            "Hello {name},\n\n\
             Your {PLATFORM_NAME} account was just signed in {origin}.\n\
             If this was not you, change your password immediately.\n"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_body_carries_the_temporary_password() {
        let email = recovery("a@b.c", "Ada", "Xy7!temp#pass", "https://app.local/login");
        assert_eq!(email.to, "a@b.c");
        assert!(email.body.contains("Xy7!temp#pass"));
        assert!(email.subject.contains(PLATFORM_NAME));
    }

    #[test]
    fn login_alert_mentions_the_client() {
        let email = login_alert("a@b.c", "Ada", Some("10.0.0.1"), None);
        assert!(email.body.contains("10.0.0.1"));
    }
}
