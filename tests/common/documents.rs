/// Minimal OPF package with the given languages and spine direction.
pub fn opf(languages: &[&str], page_progression: Option<&str>) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:identifier id="uid">urn:uuid:0000</dc:identifier>
    <dc:title>Sample</dc:title>
"#,
    );
    for language in languages {
        out.push_str(&format!("    <dc:language>{}</dc:language>\n", language));
    }
    out.push_str("  </metadata>\n  <manifest>\n");
    out.push_str(
        r#"    <item id="c1" href="c1.xhtml" media-type="application/xhtml+xml"/>
"#,
    );
    out.push_str("  </manifest>\n");
    match page_progression {
        Some(dir) => out.push_str(&format!(
            "  <spine page-progression-direction=\"{}\">\n",
            dir
        )),
        None => out.push_str("  <spine>\n"),
    }
    out.push_str("    <itemref idref=\"c1\"/>\n  </spine>\n</package>\n");
    out
}

/// XHTML chapter with `paragraphs` paragraphs and optional publisher CSS.
pub fn chapter(paragraphs: usize, stylesheet: Option<&str>) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
<head>
<meta charset="utf-8"/>
<title>Chapter</title>
"#,
    );
    if let Some(href) = stylesheet {
        out.push_str(&format!(
            "<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\"/>\n",
            href
        ));
    }
    out.push_str("</head>\n<body>\n<section epub:type=\"chapter\">\n");
    for i in 0..paragraphs {
        out.push_str(&format!(
            "<p id=\"p{}\">Paragraph {} with <em>emphasis</em> &amp; an entity.</p>\n",
            i, i
        ));
    }
    out.push_str("</section>\n</body>\n</html>\n");
    out
}
