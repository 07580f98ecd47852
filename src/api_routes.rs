use crate::api_state::AppState;
use crate::models::api::{ApiResponse, ErrorResponse};
use crate::models::current_user::CurrentUser;
use crate::models::error::{DomainError, Result};
use crate::models::error_type::ErrorType;
use crate::models::log_param::LogParam;
use crate::models::log_view::LogView;
use crate::models::page::{PageRequest, PageResult, Sort};
use crate::utils::error_msg::return_msg;
use log::error;
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{self, FromRequest, Request};
use rocket::serde::json::Json;
use rocket::State;

const LOG: &str = "log";
const USER_ID_HEADER: &str = "X-User-Id";
const USERNAME_HEADER: &str = "X-Username";

type ApiError = (Status, Json<ErrorResponse>);

/// The calling user, taken from the `X-User-Id` and `X-Username` headers
#[rocket::async_trait]
impl<'r> FromRequest<'r> for CurrentUser {
    type Error = String;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let id = req
            .headers()
            .get_one(USER_ID_HEADER)
            .and_then(|value| value.trim().parse::<i64>().ok());
        let usr = req
            .headers()
            .get_one(USERNAME_HEADER)
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match (id, usr) {
            (Some(id), Some(usr)) => Outcome::Success(CurrentUser {
                id,
                usr: usr.to_string(),
            }),
            _ => Outcome::Error((
                Status::Unauthorized,
                format!("missing or malformed {} / {} headers", USER_ID_HEADER, USERNAME_HEADER),
            )),
        }
    }
}

fn error_response(err: DomainError) -> ApiError {
    let status = match &err {
        DomainError::NotFound { .. } => Status::NotFound,
        DomainError::InvalidPageRequest(_) => Status::BadRequest,
        _ => {
            error!("Request failed: {}", err);
            Status::InternalServerError
        }
    };
    (status, Json(ErrorResponse::from(&err)))
}

fn page_request(
    page: Option<usize>,
    size: Option<usize>,
    sort: Option<&str>,
    state: &AppState,
) -> Result<PageRequest> {
    let request = PageRequest::new(page.unwrap_or(0), state.page_size(size))?;
    match sort {
        Some(sort) => Ok(request.with_sort(sort.parse::<Sort>()?)),
        None => Ok(request),
    }
}

/// POST /api/logs - Create a log for the calling user
#[post("/logs", format = "json", data = "<param>")]
pub fn create_log(
    param: Json<LogParam>,
    current_user: CurrentUser,
    state: &State<AppState>,
) -> std::result::Result<(Status, Json<ApiResponse<LogView>>), ApiError> {
    let view = state
        .log_service()
        .create(param.into_inner(), &current_user)
        .map_err(error_response)?;

    Ok((
        Status::Created,
        Json(ApiResponse::ok(format!("create {}", LOG), view)),
    ))
}

/// GET /api/logs - All logs
#[get("/logs")]
pub fn list_logs(
    state: &State<AppState>,
) -> std::result::Result<Json<ApiResponse<Vec<LogView>>>, ApiError> {
    let logs = state.log_service().list_all().map_err(error_response)?;
    Ok(Json(ApiResponse::ok(format!("index {}", LOG), logs)))
}

/// GET /api/logs/page - One page of logs
#[get("/logs/page?<page>&<size>&<sort>")]
pub fn list_log_page(
    page: Option<usize>,
    size: Option<usize>,
    sort: Option<String>,
    state: &State<AppState>,
) -> std::result::Result<Json<ApiResponse<PageResult<LogView>>>, ApiError> {
    let request = page_request(page, size, sort.as_deref(), state).map_err(error_response)?;
    let logs = state
        .log_service()
        .list_page(&request)
        .map_err(error_response)?;
    Ok(Json(ApiResponse::ok(format!("index {}", LOG), logs)))
}

/// GET /api/health - Health check endpoint
#[get("/health")]
pub fn health_check() -> &'static str {
    "OK"
}

#[catch(401)]
pub fn unauthorized() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        ErrorType::InvalidParam,
        return_msg(
            ErrorType::InvalidParam,
            &["user", "send X-User-Id and X-Username headers"],
        ),
    ))
}

#[catch(default)]
pub fn default_catcher(status: Status, _req: &Request) -> Json<ErrorResponse> {
    let error_type = if status.code >= 500 {
        ErrorType::SystemError
    } else {
        ErrorType::InvalidParam
    };
    Json(ErrorResponse::new(error_type, status.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::api_state::AppState;
    use crate::build_rocket;
    use crate::models::config::Config;
    use crate::repo::sqlite::SqliteLogRepository;
    use rocket::http::{ContentType, Header, Status};
    use rocket::local::blocking::Client;
    use serde_json::Value;

    fn client() -> Client {
        let config = Config::in_memory();
        let repository =
            SqliteLogRepository::open(&config.database_file, config.pool_size).unwrap();
        Client::tracked(build_rocket(AppState::new(repository, &config))).unwrap()
    }

    fn create(client: &Client, body: &str) -> (Status, Value) {
        let response = client
            .post("/api/logs")
            .header(ContentType::JSON)
            .header(Header::new("X-User-Id", "1"))
            .header(Header::new("X-Username", "alice"))
            .body(body)
            .dispatch();
        let status = response.status();
        (status, response.into_json::<Value>().unwrap())
    }

    #[test]
    fn test_health_check() {
        let client = client();
        let response = client.get("/api/health").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().unwrap(), "OK");
    }

    #[test]
    fn test_create_log() {
        let client = client();

        let (status, body) = create(&client, r#"{"action":"LOGIN","ip":"10.0.0.1"}"#);

        assert_eq!(status, Status::Created);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "create log");
        assert_eq!(body["data"]["user_id"], 1);
        assert_eq!(body["data"]["username"], "alice");
        assert_eq!(body["data"]["action"], "LOGIN");
        assert_eq!(body["data"]["ip"], "10.0.0.1");
    }

    #[test]
    fn test_create_log_without_user_is_unauthorized() {
        let client = client();

        let response = client
            .post("/api/logs")
            .header(ContentType::JSON)
            .body(r#"{"action":"LOGIN"}"#)
            .dispatch();

        assert_eq!(response.status(), Status::Unauthorized);
        let body = response.into_json::<Value>().unwrap();
        assert_eq!(body["error"], "SYS0002");
    }

    #[test]
    fn test_list_logs_empty_is_not_found() {
        let client = client();

        let response = client.get("/api/logs").dispatch();

        assert_eq!(response.status(), Status::NotFound);
        let body = response.into_json::<Value>().unwrap();
        assert_eq!(body["error"], "SYS0121");
        assert_eq!(body["details"], "No log exists.");
    }

    #[test]
    fn test_list_logs_after_create() {
        let client = client();
        create(&client, r#"{"action":"LOGIN"}"#);
        create(&client, r#"{"action":"LOGOUT"}"#);

        let response = client.get("/api/logs").dispatch();

        assert_eq!(response.status(), Status::Ok);
        let body = response.into_json::<Value>().unwrap();
        assert_eq!(body["message"], "index log");
        let logs = body["data"].as_array().unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0]["action"], "LOGIN");
        assert_eq!(logs[1]["action"], "LOGOUT");
    }

    #[test]
    fn test_list_log_page() {
        let client = client();
        for action in ["A", "B", "C"] {
            create(&client, &format!(r#"{{"action":"{}"}}"#, action));
        }

        let response = client
            .get("/api/logs/page?page=0&size=2&sort=action,desc")
            .dispatch();

        assert_eq!(response.status(), Status::Ok);
        let body = response.into_json::<Value>().unwrap();
        assert_eq!(body["data"]["total_elements"], 3);
        assert_eq!(body["data"]["total_pages"], 2);
        assert_eq!(body["data"]["page"], 0);
        assert_eq!(body["data"]["size"], 2);
        let content = body["data"]["content"].as_array().unwrap();
        assert_eq!(content[0]["action"], "C");
        assert_eq!(content[1]["action"], "B");
    }

    #[test]
    fn test_list_log_page_past_end_is_not_found() {
        let client = client();
        create(&client, r#"{"action":"LOGIN"}"#);

        let response = client.get("/api/logs/page?page=3&size=10").dispatch();

        assert_eq!(response.status(), Status::NotFound);
    }

    #[test]
    fn test_list_log_page_bad_sort_is_bad_request() {
        let client = client();
        create(&client, r#"{"action":"LOGIN"}"#);

        let response = client.get("/api/logs/page?sort=password").dispatch();

        assert_eq!(response.status(), Status::BadRequest);
        let body = response.into_json::<Value>().unwrap();
        assert_eq!(body["error"], "SYS0002");
    }

    #[test]
    fn test_list_log_page_zero_size_is_bad_request() {
        let client = client();
        create(&client, r#"{"action":"LOGIN"}"#);

        let response = client.get("/api/logs/page?size=0").dispatch();

        assert_eq!(response.status(), Status::BadRequest);
    }
}
