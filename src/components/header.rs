use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlSelectElement};

use crate::constants::{ID_MODEL_SELECT, ID_OPEN_PREVIEW_LINK, ID_PROJECT_SELECT};
use crate::dom_utils::by_id;
use crate::network::api_config;
use crate::state::AppState;

pub fn render(document: &Document, state: &AppState) -> Result<(), JsValue> {
    let project_select = by_id(document, ID_PROJECT_SELECT)?;
    fill_select(document, &project_select, &state.projects, &state.project_id, "No projects")?;

    let model_select = by_id(document, ID_MODEL_SELECT)?;
    fill_select(document, &model_select, &state.models, &state.selected_model, "Loading models\u{2026}")?;

    let link = by_id(document, ID_OPEN_PREVIEW_LINK)?;
    link.set_attribute("href", &api_config().preview_url(&state.project_id))?;
    Ok(())
}

/// Rebuild the options of a `<select>` and select `current`.  An empty list
/// shows a single disabled placeholder.
fn fill_select(
    document: &Document,
    select: &Element,
    values: &[String],
    current: &str,
    placeholder: &str,
) -> Result<(), JsValue> {
    select.set_inner_html("");

    if values.is_empty() {
        let option = document.create_element("option")?;
        option.set_attribute("value", "")?;
        option.set_attribute("disabled", "")?;
        option.set_text_content(Some(placeholder));
        select.append_child(&option)?;
        return Ok(());
    }

    for value in values {
        let option = document.create_element("option")?;
        option.set_attribute("value", value)?;
        if value == current {
            option.set_attribute("selected", "selected")?;
        }
        option.set_text_content(Some(value));
        select.append_child(&option)?;
    }

    if let Some(select) = select.dyn_ref::<HtmlSelectElement>() {
        select.set_value(current);
    }
    Ok(())
}
