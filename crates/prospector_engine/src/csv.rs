//! CSV serialization for the results table.
//!
//! The delimiter is `;` (the originating locale's spreadsheet convention)
//! and the writer prepends a UTF-8 byte-order marker so consumers that
//! sniff the encoding read accented text correctly.

use crate::ScrapeHit;

/// Byte-order marker prepended to the exported file.
pub const UTF8_BOM: &str = "\u{feff}";

const HEADER: &str = "Site;Termos;Descrição;Link";
const DELIMITER: char = ';';

/// Serialize the result set. Returns `None` for an empty set; a header-only
/// file is never produced.
///
/// Quoting policy: a field is wrapped in `"..."` (with inner `"` doubled)
/// only when it contains the delimiter, a quote, or a line break; all other
/// fields are emitted verbatim.
pub fn to_csv(rows: &[ScrapeHit]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(HEADER.to_string());
    for row in rows {
        let fields = [&row.site, &row.termos, &row.descricao, &row.link];
        let line = fields
            .iter()
            .map(|field| escape_field(field))
            .collect::<Vec<_>>()
            .join(&DELIMITER.to_string());
        lines.push(line);
    }
    Some(lines.join("\n"))
}

/// Timestamped export filename. `timestamp` is expected in RFC3339 shape;
/// `:` and `.` are replaced so the name is filesystem-safe, and the stamp is
/// clipped to second precision.
pub fn export_filename(timestamp: &str) -> String {
    let mut stamp: String = timestamp
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .collect();
    stamp.truncate(19);
    format!("resultado_tratores_{stamp}.csv")
}

fn escape_field(field: &str) -> String {
    let needs_quoting = field.contains(DELIMITER)
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r');
    if needs_quoting {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{export_filename, to_csv};
    use crate::ScrapeHit;

    fn hit(site: &str, termos: &str, descricao: &str, link: &str) -> ScrapeHit {
        ScrapeHit {
            site: site.to_owned(),
            termos: termos.to_owned(),
            descricao: descricao.to_owned(),
            link: link.to_owned(),
        }
    }

    /// Minimal delimiter-aware reader for round-trip checks.
    fn parse_line(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        current.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '"' => in_quotes = true,
                ';' if !in_quotes => fields.push(std::mem::take(&mut current)),
                other => current.push(other),
            }
        }
        fields.push(current);
        fields
    }

    #[test]
    fn empty_result_set_produces_no_file() {
        assert_eq!(to_csv(&[]), None);
    }

    #[test]
    fn plain_fields_are_not_quoted() {
        let csv = to_csv(&[hit("a", "t", "d", "l")]).unwrap();
        assert_eq!(csv, "Site;Termos;Descrição;Link\na;t;d;l");
    }

    #[test]
    fn field_with_delimiter_is_quoted_and_others_are_not() {
        let csv = to_csv(&[hit("A;B", "t", "d", "l")]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "\"A;B\";t;d;l");
    }

    #[test]
    fn quotes_are_doubled_inside_quoted_fields() {
        let csv = to_csv(&[hit("say \"hi\"", "t", "d", "l")]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "\"say \"\"hi\"\"\";t;d;l");
    }

    #[test]
    fn round_trip_recovers_field_values() {
        let original = hit("A;B", "say \"hi\"", "linha um", "http://x/?a=1;b=2");
        let csv = to_csv(&[original.clone()]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        let fields = parse_line(row);
        assert_eq!(
            fields,
            vec![
                original.site,
                original.termos,
                original.descricao,
                original.link
            ]
        );
    }

    #[test]
    fn header_uses_accented_display_name() {
        let csv = to_csv(&[hit("a", "t", "d", "l")]).unwrap();
        assert!(csv.starts_with("Site;Termos;Descrição;Link\n"));
    }

    #[test]
    fn export_filename_is_filesystem_safe() {
        let name = export_filename("2026-08-30T12:34:56.789Z");
        assert_eq!(name, "resultado_tratores_2026-08-30T12-34-56.csv");
    }
}
