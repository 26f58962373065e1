#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::Request;
use poem_openapi::{ OpenApi, payload::{Form, Html, PlainText}, Object, ApiResponse };
use anyhow::Result;
use serde::Deserialize;
use log::{error, info};

use crate::utils::app_state::AppState;
use crate::utils::templates::render_row;
use crate::utils::hx_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct CreateDogApi {
    pub state: Arc<AppState>,
}

// Missing fields become empty strings; the browser's required attribute is
// the only validation.
#[derive(Object, Deserialize, Debug)]
pub struct ReqCreateDog
{
    name: Option<String>,
    breed: Option<String>,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqCreateDog {
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
    #[oai(status = 201)]
    Http201(Html<String>),
    #[oai(status = 500)]
    Http500(PlainText<String>),
}

fn make_http_201(row: String) -> HxResponse {
    HxResponse::Http201(Html(row))
}
fn make_http_500(msg: String) -> HxResponse {
    HxResponse::Http500(PlainText(msg))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl CreateDogApi {
    #[oai(path = "/dog", method = "post")]
    async fn create_dog(&self, http_req: &Request, req: Form<ReqCreateDog>) -> HxResponse {
        match process(&self.state, http_req, &req.0) {
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
/** Add the dog and return its row for insertion at the top of the table. */
fn process(state: &AppState, http_req: &Request, req: &ReqCreateDog) -> Result<HxResponse> {
    // Conditional logging depending on log level.
    hx_utils::debug_request(http_req, req);

    let name = req.name.clone().unwrap_or_default();
    let breed = req.breed.clone().unwrap_or_default();
    let dog = state.store.add(&name, &breed);
    info!("Dog '{}' ({}) created with id {}.", dog.name, dog.breed, dog.id);

    Ok(make_http_201(render_row(&dog, false)?))
}
