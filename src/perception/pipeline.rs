/// Perception pipeline: raw dump -> node tree -> filtered elements -> prompt.
///
/// Each call is a pure function of its input. Nothing is cached between calls.
use crate::capture::CaptureTransport;
use crate::errors::DroidScopeResult;
use crate::perception::filter::extract_elements;
use crate::perception::hierarchy::parse_dump;
use crate::perception::render::render_prompt;
use crate::perception::types::Perception;

/// Runs the full pipeline over one dump.
///
/// An empty (or whitespace-only) dump is a valid blank screen and yields an
/// empty [`Perception`]. Anything else that is not well-formed fails with
/// `MalformedDocument` and produces no elements.
pub fn perceive(dump: &[u8]) -> DroidScopeResult<Perception> {
    if dump.iter().all(u8::is_ascii_whitespace) {
        tracing::debug!("empty dump; nothing to extract");
        return Ok(Perception::empty());
    }

    let root = parse_dump(dump)?;
    let elements = extract_elements(&root);
    let prompt = render_prompt(&elements);
    Ok(Perception { elements, prompt })
}

/// Pulls one dump from `transport` and runs it through [`perceive`].
/// Acquisition failures are returned unchanged.
pub async fn capture_and_perceive(transport: &dyn CaptureTransport) -> DroidScopeResult<Perception> {
    let dump = transport.capture().await?;
    let perception = perceive(&dump)?;
    tracing::info!(elements = perception.elements.len(), "screen perceived");
    Ok(perception)
}
