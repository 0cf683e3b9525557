use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::types::{ExtractedPoems, MergeReport, PoemUpdate};

/// Fill empty `content` fields of poem records from the extracted poems.
///
/// Records are matched by case-insensitive substring containment in either
/// direction; the first extracted title that matches wins. Records that
/// already have content are never touched.
pub fn merge(poems: &mut [Value], extracted: &ExtractedPoems) -> Result<MergeReport> {
    let mut report = MergeReport::default();

    for (idx, poem) in poems.iter_mut().enumerate() {
        let record = poem
            .as_object_mut()
            .with_context(|| format!("Poem record {idx} is not a JSON object"))?;
        let title = record_title(record, idx)?.to_string();
        let content = record
            .get("content")
            .with_context(|| format!("Poem record {idx} ({title:?}) has no `content` field"))?;
        if !is_empty_content(content) {
            log::debug!("skipping {title:?}: content already present");
            continue;
        }

        let Some(lines) = find_match(&title, extracted) else {
            log::debug!("no extracted poem matches {title:?}");
            continue;
        };
        record.insert(
            "content".to_string(),
            Value::Array(lines.iter().cloned().map(Value::String).collect()),
        );
        report.updates.push(PoemUpdate {
            title,
            line_count: lines.len(),
        });
    }

    Ok(report)
}

fn record_title(record: &Map<String, Value>, idx: usize) -> Result<&str> {
    match record.get("title") {
        Some(Value::String(title)) => Ok(title),
        Some(other) => bail!("Poem record {idx} has a non-string `title`: {other}"),
        None => bail!("Poem record {idx} has no `title` field"),
    }
}

/// Falsy JSON values count as "no content yet".
fn is_empty_content(content: &Value) -> bool {
    match content {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// First extracted entry whose title contains, or is contained in, `title`.
fn find_match<'a>(title: &str, extracted: &'a ExtractedPoems) -> Option<&'a [String]> {
    let wanted = title.to_lowercase();
    extracted
        .iter()
        .find(|(candidate, _)| titles_overlap(&wanted, &candidate.to_lowercase()))
        .map(|(_, lines)| lines)
}

fn titles_overlap(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}
