use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::{ACTION_TOGGLE_MAPS_RAW, CSS_MUTED};
use crate::dom_utils::{action_button, element};
use crate::state::AppState;
use crate::utils::{count_keys, pretty_json};

const MAP_SECTIONS: [(&str, &str); 6] = [
    ("agents_registry", "Agents registry"),
    ("capabilities", "Capabilities"),
    ("permissions", "Permissions"),
    ("ui_map", "UI map"),
    ("system_map", "System map"),
    ("health_checks", "Health checks"),
];

/// `(label, key count)` for each known section of the system maps.
pub fn map_stats(maps: &Value) -> Vec<(&'static str, usize)> {
    MAP_SECTIONS
        .iter()
        .map(|(key, label)| (*label, count_keys(maps.get(key))))
        .collect()
}

pub fn build(document: &Document, state: &AppState) -> Result<Element, JsValue> {
    let panel = element(document, "div", "maps-panel", "")?;
    let heading = element(document, "h3", "", "System maps")?;
    panel.append_child(&heading)?;

    let Some(maps) = &state.system_maps else {
        let line = element(document, "div", CSS_MUTED, "Maps not loaded yet.")?;
        panel.append_child(&line)?;
        return Ok(panel);
    };

    let grid = element(document, "div", "maps-grid", "")?;
    for (label, count) in map_stats(maps) {
        let card = element(document, "div", "card", "")?;
        let heading = element(document, "h3", "", label)?;
        card.append_child(&heading)?;
        let line = element(document, "div", CSS_MUTED, &format!("{} keys", count))?;
        card.append_child(&line)?;
        grid.append_child(&card)?;
    }
    panel.append_child(&grid)?;

    let label = if state.maps_show_raw { "Hide raw" } else { "Show raw" };
    let button = action_button(document, label, ACTION_TOGGLE_MAPS_RAW, None)?;
    panel.append_child(&button)?;
    if state.maps_show_raw {
        let pre = element(document, "pre", "raw-json", &pretty_json(maps))?;
        panel.append_child(&pre)?;
    }
    Ok(panel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_each_section() {
        let maps = json!({
            "agents_registry": {"planner": {}, "coder": {}},
            "capabilities": ["read", "write", "shell"],
            "ui_map": "not an object"
        });
        let stats = map_stats(&maps);
        assert_eq!(stats.len(), 6);
        assert_eq!(stats[0], ("Agents registry", 2));
        assert_eq!(stats[1], ("Capabilities", 3));
        assert_eq!(stats[3], ("UI map", 0));
        assert_eq!(stats[5], ("Health checks", 0));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod dom_tests {
    use super::*;
    use serde_json::json;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn raw_json_hidden_until_toggled() {
        let document = crate::dom_utils::document().unwrap();
        let mut state = AppState::new();
        state.system_maps = Some(json!({"capabilities": {"a": 1}}));

        let panel = build(&document, &state).unwrap();
        assert!(panel.query_selector(".raw-json").unwrap().is_none());

        state.maps_show_raw = true;
        let panel = build(&document, &state).unwrap();
        assert!(panel.query_selector(".raw-json").unwrap().is_some());
    }
}
