//! Prompt assembly for the story model. All pure string construction so
//! the exact prompt a place produces is testable offline.

use placewalk_common::{ArticleResult, LocationContext, PlaceCandidate, PlaceKind};

pub const SYSTEM_PROMPT: &str = "You are a master storyteller who creates engaging narratives \
     about places. You always consider the visitor's current location and frame stories \
     appropriately.";

/// "The visitor is currently in Soho, London" when the geocoder gave us
/// anything to work with, `None` otherwise.
pub fn location_sentence(ctx: &LocationContext) -> Option<String> {
    match (ctx.area.as_deref(), ctx.city.as_deref()) {
        (Some(area), Some(city)) => Some(format!("The visitor is currently in {area}, {city}")),
        (Some(part), None) | (None, Some(part)) => {
            Some(format!("The visitor is currently in {part}"))
        }
        (None, None) => None,
    }
}

/// Memorials get framed from the visitor's physical position rather than
/// as an abstract biography.
pub fn is_memorial(place: &PlaceCandidate) -> bool {
    place.kind == PlaceKind::Memorial || place.name.to_lowercase().contains("memorial")
}

fn memorial_paragraph(place: &PlaceCandidate, location: &str) -> String {
    format!(
        "Important: The visitor is standing at the {name} memorial/monument. {location}\n\
         Frame the story from this perspective - they are AT the memorial, not reading about \
         the person in abstract. Connect the person's story to why they are memorialized in \
         THIS specific location.",
        name = place.name,
    )
}

/// The full user prompt for one place. `place` is absent on the manual
/// search path, which has no discovered candidate to frame around.
pub fn build_prompt(
    place: Option<&PlaceCandidate>,
    article: &ArticleResult,
    ctx: &LocationContext,
) -> String {
    let location = location_sentence(ctx).unwrap_or_default();
    let memorial = match place {
        Some(place) if is_memorial(place) => memorial_paragraph(place, &location),
        _ => String::new(),
    };

    format!(
        "Transform the following Wikipedia information about {title} into an engaging, \
         narrative-driven story that someone would enjoy hearing while walking past this \
         location.\n\n\
         {location}\n\
         {memorial}\n\n\
         Make it conversational, interesting, and about 2-3 minutes of speaking time \
         (roughly 300-400 words). Include interesting facts, historical context, or amusing \
         anecdotes if available. Write it as if you're a knowledgeable local guide talking \
         to a friend who is standing right at this spot.\n\n\
         If this is about a person who has a memorial here, explain their connection to this \
         area and why they're commemorated here.\n\n\
         Source information:\n{extract}\n\n\
         Create an engaging narrative story that's relevant to someone standing at this \
         location:",
        title = article.title,
        extract = article.extract,
    )
}
