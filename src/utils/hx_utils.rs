#![forbid(unsafe_code)]

use path_absolutize::Absolutize;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use poem::{Endpoint, Request, Response};
use log::{debug, info, LevelFilter};
use uuid::Uuid;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Response header that makes htmx fire a client side event.  The response
// enums must spell it as a literal in their oai attributes, so only the
// tests refer to this name.
#[cfg(test)]
pub const HX_TRIGGER       : &str = "HX-Trigger";

// Event telling the page to fetch the form again.
pub const SELECTION_CHANGE : &str = "selection-change";

// ***************************************************************************
// GENERAL PUBLIC FUNCTIONS
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_absolute_path:
// ---------------------------------------------------------------------------
/** Replace tilde (~) and environment variable values in a path name and
 * then construct the absolute path name.  Unlike canonicalize, absolutize
 * does not care whether the file exists.  On any failure the original path
 * is returned unchanged.
 */
pub fn get_absolute_path(path: &str) -> String {
    // Replace ~ and environment variable values if possible.
    let s = match shellexpand::full(path) {
        Ok(x) => x,
        Err(_) => return path.to_owned(),
    };

    // Convert to absolute path if necessary.
    let p = Path::new(s.deref());
    let p1 = match p.absolutize() {
        Ok(x) => x,
        Err(_) => return path.to_owned(),
    };
    match p1.to_str() {
        Some(x) => x.to_owned(),
        None => path.to_owned(),
    }
}

// ***************************************************************************
//                                  Traits
// ***************************************************************************
pub trait RequestDebug {
    fn get_request_info(&self) -> String;
}

// ---------------------------------------------------------------------------
// debug_request:
// ---------------------------------------------------------------------------
// Dump http request information to the log.
pub fn debug_request(http_req: &Request, req: &impl RequestDebug) {
    // Check that debug or higher logging is in effect.
    let level = log::max_level();
    if level < LevelFilter::Debug {
        return;
    }

    // Accumulate the output.
    let mut s = "\n".to_string();

    // Restate the URI.
    let uri = http_req.uri();
    s += format!("  URI: {:?}\n", uri).as_str();

    // Accumulate the headers
    for v in http_req.headers().iter() {
         s += format!("  Header: {} = {:?} \n", v.0, v.1).as_str();
    };

    // Add the request's information.
    s += req.get_request_info().as_str();

    // Write the single log record.
    debug!("{}", s);
}

// ***************************************************************************
//                               Middleware
// ***************************************************************************
// ---------------------------------------------------------------------------
// log_request:
// ---------------------------------------------------------------------------
/** Log the start and completion of every request.  Each request gets its
 * own trace id so the two records can be matched up.  Handler errors are
 * converted into responses here so their status is logged too.
 */
pub async fn log_request<E: Endpoint>(ep: Arc<E>, req: Request) -> poem::Result<Response> {
    let trace_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let path = match req.uri().query() {
        Some(q) => format!("{}?{}", req.uri().path(), q),
        None => req.uri().path().to_string(),
    };
    let remote_addr = req.remote_addr().to_string();
    let now = Instant::now();

    info!("{} : request started method={} path={} remoteaddr={}",
          trace_id, method, path, remote_addr);

    let resp = ep.get_response(req).await;

    info!("{} : request completed method={} path={} remoteaddr={} statusCode={} since={:?}",
          trace_id, method, path, remote_addr, resp.status().as_u16(), now.elapsed());

    Ok(resp)
}
