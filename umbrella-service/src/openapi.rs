use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::models::{CityVerdict, Location, Verdict, VerdictKind, WeatherCategory};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::resolve_city,
        handlers::suggest_cities,
        handlers::forecast,
        handlers::check_city,
    ),
    components(schemas(
        Location,
        Verdict,
        VerdictKind,
        WeatherCategory,
        CityVerdict,
    )),
    tags(
        (name = "geocoding", description = "City lookup and autocomplete"),
        (name = "forecast", description = "Rain verdicts"),
    ),
)]
struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
