#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::Request;
use poem_openapi::{ OpenApi, payload::{Form, Html, PlainText}, param::Path, Object, ApiResponse };
use anyhow::Result;
use serde::Deserialize;
use log::{error, info};

use crate::utils::app_state::AppState;
use crate::utils::templates::render_row;
use crate::utils::hx_utils::{self, RequestDebug, SELECTION_CHANGE};

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct UpdateDogApi {
    pub state: Arc<AppState>,
}

#[derive(Object, Deserialize, Debug)]
pub struct ReqUpdateDog
{
    name: Option<String>,
    breed: Option<String>,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqUpdateDog {
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request body:");
        s.push_str("\n    name: ");
        s.push_str(self.name.as_deref().unwrap_or_default());
        s.push_str("\n    breed: ");
        s.push_str(self.breed.as_deref().unwrap_or_default());
        s
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum HxResponse {
    #[oai(status = 200)]
    Http200(Html<String>, #[oai(header = "HX-Trigger")] String),
    #[oai(status = 500)]
    Http500(PlainText<String>),
}

fn make_http_200(row: String) -> HxResponse {
    HxResponse::Http200(Html(row), SELECTION_CHANGE.to_string())
}
fn make_http_500(msg: String) -> HxResponse {
    HxResponse::Http500(PlainText(msg))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl UpdateDogApi {
    #[oai(path = "/dog/:id", method = "put")]
    async fn update_dog(&self, http_req: &Request, id: Path<String>, req: Form<ReqUpdateDog>) -> HxResponse {
        match process(&self.state, http_req, &id.0, &req.0) {
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
// ---------------------------------------------------------------------------
// process:
// ---------------------------------------------------------------------------
/** Replace the dog's fields and end the edit.  The returned row is marked for
 * out-of-band swapping since the form, not the row, issued the request.  An
 * unknown id results in a new record stored under that id.
 */
fn process(state: &AppState, http_req: &Request, id: &str, req: &ReqUpdateDog) -> Result<HxResponse> {
    // Conditional logging depending on log level.
    hx_utils::debug_request(http_req, req);

    let name = req.name.clone().unwrap_or_default();
    let breed = req.breed.clone().unwrap_or_default();
    let dog = state.store.put(id, &name, &breed);
    state.selection.clear();
    info!("Dog {} updated to '{}' ({}).", dog.id, dog.name, dog.breed);

    Ok(make_http_200(render_row(&dog, true)?))
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use crate::utils::hx_utils::{HX_TRIGGER, SELECTION_CHANGE};
    use crate::utils::selection::Selection;
    use crate::v1::dogs::test_client;

    #[tokio::test]
    async fn update_replaces_fields_and_clears_selection() {
        let (cli, state) = test_client(true);
        let oscar = state.store.list().remove(1);
        cli.get(format!("/v1/select/{}", oscar.id)).send().await.assert_status_is_ok();

        let resp = cli.put(format!("/v1/dog/{}", oscar.id))
            .form(&[("name", "Oscar II"), ("breed", "Pointer")])
            .send()
            .await;
        resp.assert_status_is_ok();
        resp.assert_header(HX_TRIGGER, SELECTION_CHANGE);
        let body = resp.0.into_body().into_string().await.unwrap();
        assert!(body.contains(&format!("id=\"row-{}\"", oscar.id)));
        assert!(body.contains("hx-swap-oob=\"true\""));
        assert!(body.contains("<td>Oscar II</td>"));

        let stored = state.store.get(&oscar.id).unwrap();
        assert_eq!(stored.name, "Oscar II");
        assert_eq!(stored.breed, "Pointer");
        assert_eq!(state.store.len(), 2);
        assert_eq!(state.selection.current(), Selection::NoSelection);
    }

    #[tokio::test]
    async fn update_unknown_id_inserts() {
        let (cli, state) = test_client(false);
        let resp = cli.put("/v1/dog/made-up")
            .form(&[("name", "Rex"), ("breed", "Mutt")])
            .send()
            .await;
        resp.assert_status_is_ok();
        assert_eq!(state.store.get("made-up").map(|d| d.name), Some("Rex".to_string()));
    }
}
