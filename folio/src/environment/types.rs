use folio_core_contact_impl::ContactFeatureServiceImpl;
use folio_email_impl::EmailTransportServiceImpl;
use folio_extern_impl::contact::ContactApiServiceImpl;
use folio_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = folio_api_rest::RestServer<ContactFeature>;

// Email
pub type EmailTransport = EmailTransportServiceImpl;

// Extern
pub type ContactApi = ContactApiServiceImpl;

// Template
pub type Template = TemplateServiceImpl;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<EmailTransport, Template>;
