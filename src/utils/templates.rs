#![forbid(unsafe_code)]

use anyhow::{Result, anyhow};
use lazy_static::lazy_static;
use tera::{Context, Tera};

use crate::utils::dog_store::Dog;
use crate::utils::errors::Errors;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Template names end in .html so tera autoescapes the record fields.
const ROW_TEMPLATE  : &str = "row.html";
const FORM_TEMPLATE : &str = "form.html";

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// The templates are compiled into the binary and parsed once on first use.
lazy_static! {
    static ref TEMPLATES: Result<Tera, String> = init_templates();
}

// ---------------------------------------------------------------------------
// init_templates:
// ---------------------------------------------------------------------------
fn init_templates() -> Result<Tera, String> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (ROW_TEMPLATE, include_str!("../../templates/row.html")),
        (FORM_TEMPLATE, include_str!("../../templates/form.html")),
    ])
    .map_err(|e| e.to_string())?;
    Ok(tera)
}

// ***************************************************************************
//                             Public Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// render_row:
// ---------------------------------------------------------------------------
/** Render one table row for a dog.  When swap_oob is set the row is marked
 * for out-of-band replacement of the row that has the same DOM id, which is
 * how an update patches a row that isn't the request's swap target.
 */
pub fn render_row(dog: &Dog, swap_oob: bool) -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert("dog", dog);
    ctx.insert("dom_id", &row_dom_id(&dog.id));
    ctx.insert("swap_oob", &swap_oob);
    render(ROW_TEMPLATE, &ctx)
}

/// Render the rows of a table body in the given order.
pub fn render_rows(dogs: &[Dog]) -> Result<String> {
    let mut html = String::new();
    for dog in dogs {
        html.push_str(&render_row(dog, false)?);
    }
    Ok(html)
}

// ---------------------------------------------------------------------------
// render_form:
// ---------------------------------------------------------------------------
/** Render the add/edit form.  With a dog the form is pre-filled and submits
 * an update for that dog; without one it is empty and creates a new dog.
 */
pub fn render_form(dog: Option<&Dog>) -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert("dog", &dog);
    render(FORM_TEMPLATE, &ctx)
}

/// DOM id of the row displaying a dog.
pub fn row_dom_id(id: &str) -> String {
    format!("row-{}", id)
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
fn render(name: &str, ctx: &Context) -> Result<String> {
    let tera = match TEMPLATES.as_ref() {
        Ok(t) => t,
        Err(e) => return Err(anyhow!(Errors::TemplateRender(name.to_string(), e.clone()))),
    };
    tera.render(name, ctx)
        .map_err(|e| anyhow!(Errors::TemplateRender(name.to_string(), e.to_string())))
}
