//! Server construction and route wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::Settings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::RegistrationService;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiError, catalog, health, students};
use crate::middleware::Trace;
use crate::outbound::persistence::JsonStudentRepository;

/// Assemble the application with every route mounted under `/api`.
///
/// Shared between [`create_server`] and the integration tests so both
/// exercise the same wiring.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // Malformed JSON bodies answer with the same {"message"} payload as
    // domain validation failures.
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::invalid_request(err.to_string()).into());

    let api = web::scope("/api")
        .service(health::health)
        .service(catalog::list_majors)
        .service(catalog::list_all_courses)
        .service(catalog::courses_by_major)
        .service(students::register)
        .service(students::complete_registration)
        .service(students::register_course)
        .service(students::get_by_email)
        .service(students::list_students)
        .service(students::update_courses)
        .service(students::delete_student);

    let app = App::new()
        .app_data(state)
        .app_data(json_config)
        .wrap(Trace)
        .service(api);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from the configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the student store cannot be prepared
/// or the socket cannot be bound.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        host,
        port,
        data_file,
        catalog,
    } = config;

    let repository = JsonStudentRepository::new(data_file)
        .map_err(|error| std::io::Error::other(error.to_string()))?;
    let registration = Arc::new(RegistrationService::new(Arc::new(repository)));
    let state = web::Data::new(HttpState::new(registration, Arc::new(catalog)));

    let server = HttpServer::new(move || build_app(state.clone()))
        .bind((host.as_str(), port))?
        .run();
    Ok(server)
}
