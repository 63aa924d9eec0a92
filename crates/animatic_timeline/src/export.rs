//! FCPXML edit-description export.
//!
//! Renders the composed element sequence as an FCPXML 1.8 document so the
//! composition can be handed to a real editing suite. This is an edit
//! description only; no media is rendered.

use animatic_core::{ElementKind, OutlineElement, SourceClip};
use std::collections::HashMap;
use uuid::Uuid;

/// Render the element sequence as an FCPXML document.
///
/// `sources` supplies clip titles for video elements; elements whose
/// `source_ref` has no match fall back to their id. Transitions carry no
/// asset reference.
pub fn write_fcpxml(
    project_name: &str,
    elements: &[OutlineElement],
    sources: &[SourceClip],
) -> String {
    let titles: HashMap<Uuid, &SourceClip> = sources.iter().map(|s| (s.id, s)).collect();

    let mut assets = String::new();
    for element in elements {
        let (Some(source_ref), Some(start), Some(end)) = (
            element.source_ref,
            element.source_start_time,
            element.source_end_time,
        ) else {
            continue;
        };
        assets.push_str(&format!(
            "      <asset id=\"{}\" src=\"clip://{}\" start=\"{}\" duration=\"{}\"/>\n",
            element.id,
            source_ref,
            xml_escape(&start.to_rfc3339()),
            xml_escape(&end.to_rfc3339()),
        ));
    }

    let mut clips = String::new();
    for element in elements {
        let name = match element.kind {
            ElementKind::Transition => "Transition".to_string(),
            ElementKind::Video => element
                .source_ref
                .and_then(|id| titles.get(&id))
                .map(|s| s.title.clone())
                .unwrap_or_else(|| element.id.to_string()),
        };
        clips.push_str(&format!(
            "            <clip name=\"{}\" offset=\"{}\" duration=\"{}\">\n",
            xml_escape(&name),
            xml_escape(&element.position_start_time.to_rfc3339()),
            xml_escape(&element.position_end_time.to_rfc3339()),
        ));
        if element.kind == ElementKind::Video {
            clips.push_str(&format!("              <video ref=\"{}\"/>\n", element.id));
        }
        clips.push_str("            </clip>\n");
    }

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<!DOCTYPE fcpxml>\n");
    xml.push_str("<fcpxml version=\"1.8\">\n");
    xml.push_str("  <resources>\n");
    xml.push_str(&assets);
    xml.push_str("  </resources>\n");
    xml.push_str("  <library>\n");
    xml.push_str("    <event name=\"Outline Event\">\n");
    xml.push_str(&format!(
        "      <project name=\"{}\">\n",
        xml_escape(project_name)
    ));
    xml.push_str("        <sequence duration=\"3600s\" format=\"r1\">\n");
    xml.push_str("          <spine>\n");
    xml.push_str(&clips);
    xml.push_str("          </spine>\n");
    xml.push_str("        </sequence>\n");
    xml.push_str("      </project>\n");
    xml.push_str("    </event>\n");
    xml.push_str("  </library>\n");
    xml.push_str("</fcpxml>\n");
    xml
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(secs)
    }

    #[test]
    fn renders_clips_and_assets() {
        let outline_id = Uuid::new_v4();
        let source = SourceClip {
            id: Uuid::new_v4(),
            title: "Mayor & council".to_string(),
            description: None,
        };
        let mut video = OutlineElement::video(outline_id, source.id, at(5), at(15));
        video.position_start_time = at(0);
        video.position_end_time = at(10);
        let mut transition = OutlineElement::transition(outline_id, Duration::seconds(3));
        transition.position_start_time = at(10);
        transition.position_end_time = at(13);

        let xml = write_fcpxml("City spot", &[video.clone(), transition], &[source]);

        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<project name=\"City spot\">"));
        // Title is escaped, clip references its asset.
        assert!(xml.contains("Mayor &amp; council"));
        assert!(xml.contains(&format!("<video ref=\"{}\"/>", video.id)));
        assert!(xml.contains("<clip name=\"Transition\""));
        // Transition contributes no asset.
        assert_eq!(xml.matches("<asset ").count(), 1);
    }
}
