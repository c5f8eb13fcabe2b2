use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ErrorResponse;
use crate::weather::handlers::HealthResponse;
use crate::weather::CurrentWeather;

/// OpenAPI documentation for the current weather API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather API",
        version = "1.0.0",
        description = "Current weather by coordinates or city name. Wraps the Open-Meteo forecast and geocoding APIs. Provide either latitude+longitude or city, not both.",
        license(
            name = "Apache 2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    ),
    paths(crate::weather::handlers::get_current_weather),
    tags(
        (name = "weather", description = "Current weather data")
    ),
    components(
        schemas(
            ErrorResponse,
            CurrentWeather,
            HealthResponse,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
