// src/core/html.rs
// Case-insensitive tag scanning over raw markup.
// Lower-casing is ASCII-only, so byte offsets found in the lowered copy are valid
// offsets into the original text.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Next `<tag` at or after `from` whose name ends right there, so `<a` never hits
/// `<abbr`. Both `lc` and `tag_lc` are already lower-cased.
fn find_open(lc: &str, tag_lc: &str, from: usize) -> Option<usize> {
    let pat = join!("<", tag_lc);
    let bytes = lc.as_bytes();
    let mut at = from;
    loop {
        let start = lc.get(at..)?.find(&pat)? + at;
        let after = start + pat.len();
        match bytes.get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(start),
            Some(_) => at = after,
            None => return None,
        }
    }
}

fn find_close(lc: &str, tag_lc: &str, from: usize) -> Option<usize> {
    let pat = join!("</", tag_lc);
    let bytes = lc.as_bytes();
    let mut at = from;
    loop {
        let start = lc.get(at..)?.find(&pat)? + at;
        let after = start + pat.len();
        match bytes.get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' => return Some(start),
            Some(_) => at = after,
            None => return None,
        }
    }
}

/// End (exclusive) of the tag opened at `start`. A quote only opens an attribute
/// value right after `=`, so a stray apostrophe in unquoted text cannot swallow the
/// rest of the document.
fn tag_end(doc: &str, start: usize) -> Option<usize> {
    let b = doc.as_bytes();
    let mut quote: Option<u8> = None;
    let mut prev = b'<';
    let mut i = start + 1;
    while i < b.len() {
        let c = b[i];
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if (c == b'"' || c == b'\'') && prev == b'=' => quote = Some(c),
            None if c == b'>' => return Some(i + 1),
            None => {}
        }
        if !c.is_ascii_whitespace() {
            prev = c;
        }
        i += 1;
    }
    None
}

/// Container block `<tag …> … </tag>` starting at the first opener at or after
/// `from`, counting nested openers of the same name. An unclosed block runs to the
/// end of the document. Not meant for void tags like `img`.
fn block_at(doc: &str, lc: &str, tag_lc: &str, from: usize) -> Option<(usize, usize)> {
    let start = find_open(lc, tag_lc, from)?;
    let mut pos = tag_end(doc, start)?;
    if doc[start..pos].ends_with("/>") {
        return Some((start, pos));
    }
    let mut depth = 1usize;
    while depth > 0 {
        let Some(close) = find_close(lc, tag_lc, pos) else {
            return Some((start, doc.len()));
        };
        match find_open(lc, tag_lc, pos) {
            Some(open) if open < close => {
                let end = tag_end(doc, open).unwrap_or(doc.len());
                if !doc[open..end].ends_with("/>") {
                    depth += 1;
                }
                pos = end;
            }
            _ => {
                depth -= 1;
                pos = doc[close..].find('>').map_or(doc.len(), |e| close + e + 1);
            }
        }
    }
    Some((start, pos))
}

pub fn balanced_block_ci(doc: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    block_at(doc, &to_lower(doc), &to_lower(tag), from)
}

/// Every opening tag `<tag …>` in document order.
pub fn open_tags_ci<'a>(doc: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = to_lower(doc);
    let tag_lc = to_lower(tag);
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(start) = find_open(&lc, &tag_lc, pos) {
        let Some(end) = tag_end(doc, start) else { break };
        out.push(&doc[start..end]);
        pos = end;
    }
    out
}

/// Top-level `<tag>…</tag>` blocks in document order.
pub fn blocks_ci<'a>(doc: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = to_lower(doc);
    let tag_lc = to_lower(tag);
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = block_at(doc, &lc, &tag_lc, pos) {
        out.push(&doc[s..e]);
        pos = e;
    }
    out
}

/// Blocks of `tag` whose `class` list contains `class` (whole word, any case).
/// Matching blocks are not searched for nested matches.
pub fn blocks_with_class<'a>(doc: &'a str, tag: &str, class: &str) -> Vec<&'a str> {
    let lc = to_lower(doc);
    let tag_lc = to_lower(tag);
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(start) = find_open(&lc, &tag_lc, pos) {
        let Some(open_end) = tag_end(doc, start) else { break };
        if has_class(&doc[start..open_end], class) {
            if let Some((s, e)) = block_at(doc, &lc, &tag_lc, start) {
                out.push(&doc[s..e]);
                pos = e;
                continue;
            }
        }
        pos = open_end;
    }
    out
}

/// Value of attribute `name` in an opening tag, entity-decoded and trimmed.
/// Double-quoted, single-quoted and bare values all work; a bare attribute
/// (`<input disabled>`) yields `Some("")`.
pub fn attr(open_tag: &str, name: &str) -> Option<String> {
    let b = open_tag.as_bytes();
    let n = b.len();

    // skip "<tagname"
    let mut i = 1;
    while i < n && !b[i].is_ascii_whitespace() && b[i] != b'>' && b[i] != b'/' { i += 1; }

    loop {
        while i < n && (b[i].is_ascii_whitespace() || b[i] == b'/') { i += 1; }
        if i >= n || b[i] == b'>' {
            return None;
        }

        let key_start = i;
        while i < n && !b[i].is_ascii_whitespace() && !matches!(b[i], b'=' | b'>' | b'/') { i += 1; }
        let key = &open_tag[key_start..i];

        while i < n && b[i].is_ascii_whitespace() { i += 1; }
        let mut value = "";
        if i < n && b[i] == b'=' {
            i += 1;
            while i < n && b[i].is_ascii_whitespace() { i += 1; }
            let (vs, ve) = match b.get(i) {
                Some(&q) if q == b'"' || q == b'\'' => {
                    let vs = i + 1;
                    let ve = open_tag[vs..].find(q as char).map_or(n, |off| vs + off);
                    i = (ve + 1).min(n);
                    (vs, ve)
                }
                _ => {
                    let vs = i;
                    while i < n && !b[i].is_ascii_whitespace() && b[i] != b'>' { i += 1; }
                    (vs, i)
                }
            };
            value = &open_tag[vs..ve];
        }

        if key.eq_ignore_ascii_case(name) {
            return Some(normalize_entities(value).trim().to_string());
        }
    }
}

pub fn has_class(open_tag: &str, class: &str) -> bool {
    attr(open_tag, "class")
        .is_some_and(|v| v.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
}

/// Given a complete block like `<td …>INNER</td>`, return INNER (may hold nested tags).
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = tag_end(block, 0) {
        if let Some(cs) = block.rfind('<') {
            if cs >= oe {
                return block[oe..cs].to_string();
            }
        }
        return block[oe..].to_string();
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Visible text of a block: tags stripped, entities decoded, whitespace collapsed.
pub fn text_of(block: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(inner_after_open_tag(block))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_reads_all_quoting_styles() {
        let tag = r#"<img SRC="/a.png" alt='Acme &amp; Co' id=hero-logo data-x>"#;
        assert_eq!(attr(tag, "src").as_deref(), Some("/a.png"));
        assert_eq!(attr(tag, "alt").as_deref(), Some("Acme & Co"));
        assert_eq!(attr(tag, "id").as_deref(), Some("hero-logo"));
        assert_eq!(attr(tag, "data-x").as_deref(), Some(""));
        assert_eq!(attr(tag, "class"), None);
    }

    #[test]
    fn quoted_gt_does_not_end_the_tag() {
        let doc = r#"<img alt="a > b" src="x.png"><p>after</p>"#;
        let tags = open_tags_ci(doc, "img");
        assert_eq!(tags.len(), 1);
        assert_eq!(attr(tags[0], "src").as_deref(), Some("x.png"));
    }

    #[test]
    fn tag_name_must_end_at_boundary() {
        let doc = "<abbr>x</abbr><a href=1>y</a>";
        let tags = open_tags_ci(doc, "a");
        assert_eq!(tags, vec!["<a href=1>"]);
    }

    #[test]
    fn balanced_block_counts_nesting() {
        let doc = r#"<DIV class="card"><div>inner</div><h2>Name</h2></div><div>next</div>"#;
        let (s, e) = balanced_block_ci(doc, "div", 0).unwrap();
        assert_eq!(&doc[s..e], r#"<DIV class="card"><div>inner</div><h2>Name</h2></div>"#);
    }

    #[test]
    fn class_blocks_match_whole_words() {
        let doc = r#"<div class="card-deck"><div class="card shadow">A</div><div class="card">B</div></div>"#;
        let cards = blocks_with_class(doc, "div", "card");
        assert_eq!(cards.len(), 2);
        assert_eq!(text_of(cards[0]), "A");
        assert_eq!(text_of(cards[1]), "B");
    }

    #[test]
    fn text_of_strips_nested_markup() {
        assert_eq!(text_of("<h2 class=h5><a href='#'> Acme&nbsp;CRM </a></h2>"), "Acme CRM");
    }
}
