#![forbid(unsafe_code)]

use std::sync::Arc;

use poem_openapi::{ OpenApi, payload::{Html, PlainText}, ApiResponse };
use anyhow::Result;
use log::error;

use crate::utils::app_state::AppState;
use crate::utils::templates::render_form;

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct GetFormApi {
    pub state: Arc<AppState>,
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum HxResponse {
    #[oai(status = 200)]
    Http200(Html<String>),
    #[oai(status = 500)]
    Http500(PlainText<String>),
}

fn make_http_200(form: String) -> HxResponse {
    HxResponse::Http200(Html(form))
}
fn make_http_500(msg: String) -> HxResponse {
    HxResponse::Http500(PlainText(msg))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl GetFormApi {
    #[oai(path = "/form", method = "get")]
    async fn get_form(&self) -> HxResponse {
        match process(&self.state) {
            Ok(r) => r,
            Err(e) => {
                let msg = "ERROR: ".to_owned() + e.to_string().as_str();
                error!("{}", msg);
                make_http_500(msg)
            }
        }
    }
}

// ***************************************************************************
//                          Private Functions
// ***************************************************************************
// A selection naming a missing dog renders the empty form.
fn process(state: &AppState) -> Result<HxResponse> {
    let dog = state.selected_dog();
    Ok(make_http_200(render_form(dog.as_ref())?))
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use crate::v1::dogs::test_client;

    #[tokio::test]
    async fn no_selection_gives_create_form() {
        let (cli, _state) = test_client(true);
        let resp = cli.get("/v1/form").send().await;
        resp.assert_status_is_ok();
        let body = resp.0.into_body().into_string().await.unwrap();
        assert!(body.contains("hx-post=\"/v1/dog\""));
        assert!(!body.contains("Cancel"));
    }

    #[tokio::test]
    async fn selection_gives_prefilled_update_form() {
        let (cli, state) = test_client(true);
        let comet = state.store.list().remove(0);
        state.selection.select(&comet.id);

        let body = cli.get("/v1/form").send().await.0.into_body().into_string().await.unwrap();
        assert!(body.contains(&format!("hx-put=\"/v1/dog/{}\"", comet.id)));
        assert!(body.contains("value=\"Comet\""));
        assert!(body.contains("value=\"Whippet\""));
        assert!(body.contains("Cancel"));
    }

    #[tokio::test]
    async fn dangling_selection_gives_create_form() {
        let (cli, state) = test_client(false);
        state.selection.select("gone");
        let body = cli.get("/v1/form").send().await.0.into_body().into_string().await.unwrap();
        assert!(body.contains("hx-post=\"/v1/dog\""));
    }
}
