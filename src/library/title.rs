/// Derive a display title from a file name: strip the matched extension,
/// split the stem on `_`, capitalize each segment and join with spaces.
///
/// `track_one.mp3` becomes `Track One`. Empty segments (`a__b`) are dropped.
pub fn title_from_file_name(file_name: &str, extensions: &[String]) -> String {
    let stem = strip_extension(file_name, extensions);
    stem.split('_')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect::<Vec<String>>()
        .join(" ")
}

fn strip_extension<'a>(file_name: &'a str, extensions: &[String]) -> &'a str {
    let Some((stem, ext)) = file_name.rsplit_once('.') else {
        return file_name;
    };
    let matched = extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.'))
        .any(|e| e.eq_ignore_ascii_case(ext));
    if matched { stem } else { file_name }
}

// First character upper-cased, the rest lower-cased.
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
