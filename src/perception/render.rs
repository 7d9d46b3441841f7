/// Renders extracted elements for the agent.
///
/// The text prompt is deliberately lossy: one line per element,
///
/// ```text
/// [3] <Button> "OK" (ID: btn_ok)
/// ```
///
/// The structured records stay the lossless source for the executor.
use crate::errors::DroidScopeResult;
use crate::perception::types::UiElement;

/// Shown instead of content for elements with neither text nor description,
/// typically icons. Tells the model to lean on the resource id.
pub const NO_TEXT_PLACEHOLDER: &str = "[icon without text]";

/// `com.tencent.mm:id/bi3` -> `bi3`.
pub fn short_resource_id(resource_id: &str) -> &str {
    resource_id.rsplit('/').next().unwrap_or(resource_id)
}

/// Collapses every line break (`\r\n`, `\r`, `\n`) into one space so a
/// multi-line TextView still renders as a single prompt line.
pub fn single_line(content: &str) -> String {
    content
        .split("\r\n")
        .flat_map(|part| part.split(['\r', '\n']))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One prompt line per element, always starting with its own `[id]` tag.
/// Bracketed text such as `[7]` is left as is inside the quotes.
pub fn render_line(element: &UiElement) -> String {
    let content = if !element.text.is_empty() {
        single_line(&element.text)
    } else if !element.description.is_empty() {
        single_line(&element.description)
    } else {
        NO_TEXT_PLACEHOLDER.to_string()
    };

    let mut line = format!("[{}] <{}> \"{}\"", element.id, element.element_type, content);
    if !element.resource_id.is_empty() {
        line.push_str(" (ID: ");
        line.push_str(short_resource_id(&element.resource_id));
        line.push(')');
    }
    line
}

/// Newline-separated prompt, one line per element, in input order.
pub fn render_prompt(elements: &[UiElement]) -> String {
    elements
        .iter()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty JSON of the first `limit` records (all of them when `None`).
pub fn render_records(elements: &[UiElement], limit: Option<usize>) -> DroidScopeResult<String> {
    let n = limit.unwrap_or(elements.len()).min(elements.len());
    Ok(serde_json::to_string_pretty(&elements[..n])?)
}
