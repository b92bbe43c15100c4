use anyhow::anyhow;
use folio_email_contracts::{MockEmailService, MockEmailTransportService};
use folio_models::{contact::ContactValidationError, email_address::EmailAddress};
use folio_templates_contracts::MockTemplateService;
use folio_utils::assert_matches;

use super::*;

#[tokio::test]
async fn ok() {
    // Arrange
    let transport = MockEmailService::new()
        .with_ping(Ok(()))
        .with_send(expected_email(), true);
    let email_transport = MockEmailTransportService::new().with_build(credentials(), transport);

    let sut = ContactFeatureServiceImpl {
        email_transport,
        template: template(),
        config: config(Some("app-password")),
    };

    // Act
    let result = sut.send_message(submission()).await;

    // Assert
    result.unwrap();
}

#[test]
fn compose() {
    // Arrange
    let sut = ContactFeatureServiceImpl {
        email_transport: MockEmailTransportService::new(),
        template: template(),
        config: config(Some("app-password")),
    };

    // Act
    let result = sut.compose(submission().validate().unwrap()).unwrap();

    // Assert
    assert_eq!(result, expected_email());
    assert_eq!(
        result.reply_to.map(EmailAddressWithName::into_email_address),
        Some("max.mustermann@example.de".parse().unwrap())
    );
}

#[tokio::test]
async fn missing_fields() {
    let clears: [fn(&mut ContactSubmission); 4] = [
        |s| s.name.clear(),
        |s| s.email.clear(),
        |s| s.subject.clear(),
        |s| s.message.clear(),
    ];

    for clear in clears {
        // Arrange
        let mut submission = submission();
        clear(&mut submission);

        let sut = ContactFeatureServiceImpl {
            email_transport: MockEmailTransportService::new(),
            template: MockTemplateService::new(),
            config: config(Some("app-password")),
        };

        // Act
        let result = sut.send_message(submission).await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSendMessageError::Validation(
                ContactValidationError::MissingFields
            ))
        );
    }
}

#[tokio::test]
async fn invalid_email() {
    // Arrange
    let sut = ContactFeatureServiceImpl {
        email_transport: MockEmailTransportService::new(),
        template: MockTemplateService::new(),
        config: config(Some("app-password")),
    };

    // Act
    let result = sut
        .send_message(ContactSubmission {
            email: "max.mustermann@example".into(),
            ..submission()
        })
        .await;

    // Assert
    assert_matches!(
        result,
        Err(ContactSendMessageError::Validation(
            ContactValidationError::InvalidEmail
        ))
    );
}

#[tokio::test]
async fn password_not_configured() {
    // Arrange
    let sut = ContactFeatureServiceImpl {
        email_transport: MockEmailTransportService::new(),
        template: MockTemplateService::new(),
        config: config(None),
    };

    // Act
    let result = sut.send_message(submission()).await;

    // Assert
    assert_matches!(result, Err(ContactSendMessageError::Unavailable));
}

#[tokio::test]
async fn transport_error() {
    // Arrange
    let sut = ContactFeatureServiceImpl {
        email_transport: MockEmailTransportService::new()
            .with_build_error(anyhow!("invalid relay host")),
        template: MockTemplateService::new(),
        config: config(Some("app-password")),
    };

    // Act
    let result = sut.send_message(submission()).await;

    // Assert
    assert_matches!(result, Err(ContactSendMessageError::Transport(_)));
}

#[tokio::test]
async fn verify_error() {
    // Arrange
    let transport = MockEmailService::new().with_ping(Err(anyhow!("authentication failed")));
    let sut = ContactFeatureServiceImpl {
        email_transport: MockEmailTransportService::new().with_build(credentials(), transport),
        template: MockTemplateService::new(),
        config: config(Some("app-password")),
    };

    // Act
    let result = sut.send_message(submission()).await;

    // Assert
    assert_matches!(result, Err(ContactSendMessageError::Verify(_)));
}

#[tokio::test(start_paused = true)]
async fn verify_timeout() {
    // Arrange
    let transport = MockEmailService::new().with_ping_pending();
    let sut = ContactFeatureServiceImpl {
        email_transport: MockEmailTransportService::new().with_build(credentials(), transport),
        template: MockTemplateService::new(),
        config: config(Some("app-password")),
    };

    // Act
    let result = sut.send_message(submission()).await;

    // Assert
    assert_matches!(
        result,
        Err(ContactSendMessageError::Verify(err)) if err.to_string().contains("timed out")
    );
}

#[tokio::test]
async fn send_rejected() {
    // Arrange
    let transport = MockEmailService::new()
        .with_ping(Ok(()))
        .with_send(expected_email(), false);
    let sut = ContactFeatureServiceImpl {
        email_transport: MockEmailTransportService::new().with_build(credentials(), transport),
        template: template(),
        config: config(Some("app-password")),
    };

    // Act
    let result = sut.send_message(submission()).await;

    // Assert
    assert_matches!(result, Err(ContactSendMessageError::Send(_)));
}

#[tokio::test]
async fn send_error() {
    // Arrange
    let transport = MockEmailService::new()
        .with_ping(Ok(()))
        .with_send_error(expected_email(), anyhow!("connection reset"));
    let sut = ContactFeatureServiceImpl {
        email_transport: MockEmailTransportService::new().with_build(credentials(), transport),
        template: template(),
        config: config(Some("app-password")),
    };

    // Act
    let result = sut.send_message(submission()).await;

    // Assert
    assert_matches!(result, Err(ContactSendMessageError::Send(_)));
}

#[tokio::test(start_paused = true)]
async fn send_timeout() {
    // Arrange
    let transport = MockEmailService::new()
        .with_ping(Ok(()))
        .with_send_pending();
    let sut = ContactFeatureServiceImpl {
        email_transport: MockEmailTransportService::new().with_build(credentials(), transport),
        template: template(),
        config: config(Some("app-password")),
    };

    // Act
    let result = sut.send_message(submission()).await;

    // Assert
    assert_matches!(
        result,
        Err(ContactSendMessageError::Send(err)) if err.to_string().contains("timed out")
    );
}

#[tokio::test]
async fn template_error() {
    // Arrange
    let transport = MockEmailService::new().with_ping(Ok(()));
    let mut template = MockTemplateService::new();
    template
        .expect_render::<ContactMessageTemplate>()
        .once()
        .return_once(|_| Err(anyhow!("template error")));

    let sut = ContactFeatureServiceImpl {
        email_transport: MockEmailTransportService::new().with_build(credentials(), transport),
        template,
        config: config(Some("app-password")),
    };

    // Act
    let result = sut.send_message(submission()).await;

    // Assert
    assert_matches!(result, Err(ContactSendMessageError::Other(_)));
}

#[tokio::test]
async fn reply_to_not_usable() {
    // Arrange
    let transport = MockEmailService::new().with_ping(Ok(()));

    let sut = ContactFeatureServiceImpl {
        email_transport: MockEmailTransportService::new().with_build(credentials(), transport),
        template: MockTemplateService::new(),
        config: config(Some("app-password")),
    };

    // Act
    let result = sut
        .send_message(ContactSubmission {
            email: "max..mustermann@example.de".into(),
            ..submission()
        })
        .await;

    // Assert
    assert_matches!(
        result,
        Err(ContactSendMessageError::Send(err)) if err.to_string().contains("reply-to")
    );
}

fn config(password: Option<&str>) -> ContactFeatureConfig {
    ContactFeatureConfig {
        sender: sender().into(),
        recipient: Arc::new("hello@example.com".parse().unwrap()),
        smtp_password: password.map(|p| Arc::new(Sensitive(p.into()))),
        subject_prefix: "Portfolio Contact: ".into(),
        verify_timeout: Duration::from_secs(10),
        send_timeout: Duration::from_secs(15),
    }
}

fn sender() -> EmailAddressWithName {
    "relay@example.com"
        .parse::<EmailAddress>()
        .unwrap()
        .with_name("Portfolio Contact Form")
}

fn credentials() -> SmtpCredentials {
    SmtpCredentials {
        username: "relay@example.com".parse().unwrap(),
        password: Sensitive("app-password".into()),
    }
}

fn submission() -> ContactSubmission {
    ContactSubmission {
        name: "Max Mustermann".into(),
        email: "max.mustermann@example.de".into(),
        subject: "Collaboration".into(),
        message: "Hello!\nLet's talk.".into(),
    }
}

fn template_data() -> ContactMessageTemplate {
    ContactMessageTemplate {
        name: "Max Mustermann".into(),
        email: "max.mustermann@example.de".into(),
        subject: "Collaboration".into(),
        message: "Hello!\nLet's talk.".into(),
    }
}

fn template() -> MockTemplateService {
    MockTemplateService::new()
        .with_render(template_data(), "<p>html</p>".into())
        .with_render(ContactMessageTextTemplate(template_data()), "text".into())
}

fn expected_email() -> Email {
    Email {
        from: sender(),
        recipient: "hello@example.com".parse().unwrap(),
        subject: "Portfolio Contact: Collaboration".into(),
        body: EmailBody::Alternative {
            text: "text".into(),
            html: "<p>html</p>".into(),
        },
        reply_to: Some("max.mustermann@example.de".parse().unwrap()),
    }
}
