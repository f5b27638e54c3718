use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::constants::*;
use crate::dom_utils::{action_button, element};

/// Build the fixed three-column skeleton once.  Everything inside the
/// containers is owned by the components and rebuilt on refresh; the chat
/// textarea and the preview iframe are created here and only updated.
pub fn create_base_ui(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(ID_APP_ROOT).is_some() {
        return Ok(());
    }
    inject_styles(document)?;

    let root = element(document, "div", "app", "")?;
    root.set_id(ID_APP_ROOT);

    let header = create_header(document)?;
    root.append_child(&header)?;

    let main = element(document, "main", "layout", "")?;
    main.set_id(ID_MAIN);
    let chat_column = create_chat_column(document)?;
    main.append_child(&chat_column)?;
    let middle_column = create_middle_column(document)?;
    main.append_child(&middle_column)?;
    let right_column = create_right_column(document)?;
    main.append_child(&right_column)?;
    root.append_child(&main)?;

    let body = document.body().ok_or(JsValue::from_str("No body found"))?;
    body.append_child(&root)?;
    Ok(())
}

fn create_header(document: &Document) -> Result<Element, JsValue> {
    let header = element(document, "header", "header", "")?;
    header.set_id(ID_HEADER);

    let heading = element(document, "h1", "title", "AI Orchestrator")?;
    header.append_child(&heading)?;

    let project_select = document.create_element("select")?;
    project_select.set_id(ID_PROJECT_SELECT);
    project_select.set_attribute(ATTR_ACTION, ACTION_SELECT_PROJECT)?;
    project_select.set_attribute("aria-label", "Project")?;
    header.append_child(&project_select)?;

    let button = action_button(document, "New project", ACTION_CREATE_PROJECT, None)?;
    header.append_child(&button)?;

    let model_select = document.create_element("select")?;
    model_select.set_id(ID_MODEL_SELECT);
    model_select.set_attribute(ATTR_ACTION, ACTION_SELECT_MODEL)?;
    model_select.set_attribute("aria-label", "Model")?;
    header.append_child(&model_select)?;

    let link = element(document, "a", "header-link", "Open preview")?;
    link.set_id(ID_OPEN_PREVIEW_LINK);
    link.set_attribute("target", "_blank")?;
    link.set_attribute("rel", "noopener")?;
    header.append_child(&link)?;

    Ok(header)
}

fn create_chat_column(document: &Document) -> Result<Element, JsValue> {
    let column = element(document, "section", "column chat-column", "")?;
    column.set_id(ID_LEFT_COLUMN);

    let status = element(document, "div", "chat-status", "")?;
    status.set_id(ID_CHAT_STATUS);
    column.append_child(&status)?;

    let log = element(document, "div", "chat-log", "")?;
    log.set_id(ID_CHAT_LOG);
    column.append_child(&log)?;

    let input = document.create_element("textarea")?;
    input.set_id(ID_CHAT_INPUT);
    input.set_class_name("chat-input");
    input.set_attribute("rows", "3")?;
    input.set_attribute("placeholder", "Describe what you want\u{2026} (Enter to send)")?;
    column.append_child(&input)?;

    let actions = element(document, "div", "chat-actions", "")?;
    let send = action_button(document, "Send", ACTION_SEND, None)?;
    send.set_id(ID_CHAT_SEND);
    send.set_class_name("primary");
    actions.append_child(&send)?;
    let run = action_button(document, "Run as workflow", ACTION_RUN_WORKFLOW, None)?;
    run.set_id(ID_CHAT_RUN_WORKFLOW);
    actions.append_child(&run)?;
    column.append_child(&actions)?;

    Ok(column)
}

fn create_middle_column(document: &Document) -> Result<Element, JsValue> {
    let column = element(document, "section", "column middle-column", "")?;
    column.set_id(ID_MIDDLE_COLUMN);

    let head = element(document, "div", "panel-head", "")?;
    head.set_id(ID_MIDDLE_HEAD);
    column.append_child(&head)?;

    let body = element(document, "div", "middle-body", "")?;
    body.set_id(ID_MIDDLE_BODY);

    let frame = document.create_element("iframe")?;
    frame.set_id(ID_PREVIEW_FRAME);
    frame.set_class_name("preview-frame");
    frame.set_attribute("title", "Project preview")?;
    body.append_child(&frame)?;

    let files = element(document, "div", "file-browser hidden", "")?;
    files.set_id(ID_FILE_BROWSER);
    body.append_child(&files)?;

    column.append_child(&body)?;
    Ok(column)
}

fn create_right_column(document: &Document) -> Result<Element, JsValue> {
    let column = element(document, "section", "column right-column", "")?;
    column.set_id(ID_RIGHT_COLUMN);

    let tabs = element(document, "div", "tab-container", "")?;
    tabs.set_id(ID_RIGHT_TABS);
    column.append_child(&tabs)?;

    let body = element(document, "div", "right-body", "")?;
    body.set_id(ID_RIGHT_BODY);
    column.append_child(&body)?;

    Ok(column)
}

fn inject_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id("app-styles").is_some() {
        return Ok(());
    }
    let css = "
body{margin:0;font-family:system-ui,sans-serif;background:#0f172a;color:#e2e8f0}
.app{display:flex;flex-direction:column;height:100vh}
.header{display:flex;align-items:center;gap:12px;padding:8px 16px;background:#111827;border-bottom:1px solid #1f2937}
.header .title{font-size:18px;margin:0 12px 0 0}
.header-link{margin-left:auto;color:#93c5fd}
.layout{display:grid;grid-template-columns:minmax(280px,1fr) 2fr minmax(320px,1.2fr);flex:1;min-height:0}
.layout.fullscreen{grid-template-columns:1fr}
.column{display:flex;flex-direction:column;min-height:0;border-right:1px solid #1f2937;padding:8px;gap:8px;overflow:hidden}
.chat-log{flex:1;overflow-y:auto;display:flex;flex-direction:column;gap:6px}
.bubble{padding:8px 10px;border-radius:8px;white-space:pre-wrap;word-break:break-word}
.bubble-user{background:#1d4ed8;align-self:flex-end}
.bubble-assistant{background:#1f2937;align-self:flex-start}
.chat-input{width:100%;box-sizing:border-box;resize:vertical;background:#111827;color:inherit;border:1px solid #374151;border-radius:6px;padding:6px}
.chat-actions,.panel-head,.tab-container,.toolbar{display:flex;gap:6px;align-items:center;flex-wrap:wrap}
button{background:#1f2937;color:inherit;border:1px solid #374151;border-radius:6px;padding:4px 10px;cursor:pointer}
button:disabled{opacity:.5;cursor:default}
button.primary{background:#2563eb;border-color:#2563eb}
.tab-button.active{background:#2563eb;border-color:#2563eb}
.middle-body{flex:1;min-height:0;display:flex}
.preview-frame{flex:1;border:0;background:#fff;border-radius:6px}
.file-browser{flex:1;display:grid;grid-template-columns:220px 1fr;gap:8px;min-height:0}
.file-list{overflow-y:auto;display:flex;flex-direction:column;gap:2px}
.file-list button{text-align:left}
.file-content,.raw-json{overflow:auto;margin:0;padding:8px;background:#111827;border-radius:6px;white-space:pre-wrap}
.right-body{flex:1;overflow-y:auto;display:flex;flex-direction:column;gap:10px}
.card{background:#111827;border:1px solid #1f2937;border-radius:8px;padding:8px}
.card h3{margin:0 0 6px;font-size:14px}
.feed{display:flex;flex-direction:column;gap:2px;font-family:ui-monospace,monospace;font-size:12px}
.feed-row .time,.muted{color:#94a3b8}
.feed-row .agent{color:#fbbf24;margin:0 6px}
.level-error{color:#f87171}
.level-warning{color:#fbbf24}
.error-block{color:#fca5a5;background:#450a0a;border-radius:6px;padding:8px}
.perm-on{background:#166534;border-color:#166534}
.hidden{display:none !important}
";
    let style = document.create_element("style")?;
    style.set_id("app-styles");
    style.set_text_content(Some(css));
    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => document.body().ok_or("no body")?.append_child(&style)?,
    };
    Ok(())
}
