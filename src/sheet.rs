//! Printable attendance sheet built from a finished roster.
//!
//! The sheet is a self-contained HTML document with every signature inlined
//! as a data URL. Turning it into a PDF is left to the host.

use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate};

use crate::roster::Attendee;

pub const COMPANY: &str = "Portal de Capacitaciones S.A.";
const DEFAULT_COURSE: &str = "Capacitación General";
const DEFAULT_FILE_STEM: &str = "Capacitacion";

const MONTHS_ES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre", "octubre",
    "noviembre", "diciembre",
];

/// Long Spanish date, e.g. `18 de octubre de 2026`.
pub fn long_date_es(date: NaiveDate) -> String {
    format!("{} de {} de {}", date.day(), MONTHS_ES[date.month0() as usize], date.year())
}

/// `Asistencia-<training>.pdf`, with every whitespace run in the training
/// name (leading and trailing ones included) replaced by a single `-`.
pub fn export_file_name(attendees: &[Attendee]) -> String {
    let stem = attendees
        .first()
        .map(|a| dash_whitespace(&a.training_name))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_FILE_STEM.to_string());
    format!("Asistencia-{}.pdf", stem)
}

fn dash_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('-');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Render the sheet issued on `issued`. An empty roster renders nothing.
pub fn render_sheet(attendees: &[Attendee], issued: NaiveDate) -> Option<String> {
    let first = attendees.first()?;
    let course = if first.training_name.trim().is_empty() {
        DEFAULT_COURSE
    } else {
        first.training_name.as_str()
    };

    let mut html = String::new();
    html.push_str("<div id=\"attendance-sheet\">\n");
    html.push_str("<header>\n<h1>PLANILLA DE ASISTENCIA</h1>\n");
    let _ = writeln!(html, "<h2>{}</h2>\n</header>", escape(COMPANY));
    html.push_str("<main>\n");
    let _ = writeln!(
        html,
        "<div class=\"details\"><div><b>Capacitación: </b><span>{}</span></div><div><b>Fecha de Emisión: </b><span>{}</span></div></div>",
        escape(course),
        long_date_es(issued)
    );
    html.push_str("<table>\n<thead><tr><th>Nombre y Apellido</th><th>DNI</th><th>Fecha y Hora de Firma</th><th>Firma</th></tr></thead>\n<tbody>\n");
    for a in attendees {
        let _ = writeln!(
            html,
            "<tr><td>{name}</td><td>{dni}</td><td>{ts}</td><td><img src=\"{src}\" alt=\"Firma de {name}\"></td></tr>",
            name = escape(&a.name),
            dni = escape(&a.dni),
            ts = escape(&a.signature_timestamp),
            src = escape(&a.signature_data_url),
        );
    }
    html.push_str("</tbody>\n</table>\n</main>\n");
    html.push_str("<footer><p>La presente planilla certifica la asistencia de los participantes mencionados a la capacitación detallada.</p></footer>\n");
    html.push_str("</div>\n");
    Some(html)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee(name: &str, training: &str) -> Attendee {
        Attendee {
            id: 1,
            name: name.into(),
            dni: "30111222".into(),
            training_name: training.into(),
            signature_data_url: "data:image/png;base64,AAAA".into(),
            signature_timestamp: "18/10/26, 14:05:09".into(),
        }
    }

    #[test]
    fn file_name_collapses_whitespace() {
        let list = vec![attendee("Ana", "Trabajo  en\tAltura")];
        assert_eq!(export_file_name(&list), "Asistencia-Trabajo-en-Altura.pdf");
        assert_eq!(export_file_name(&[]), "Asistencia-Capacitacion.pdf");
    }

    #[test]
    fn file_name_keeps_edge_whitespace_as_dashes() {
        assert_eq!(export_file_name(&[attendee("Ana", " A ")]), "Asistencia--A-.pdf");
        assert_eq!(export_file_name(&[attendee("Ana", "  ")]), "Asistencia--.pdf");
        assert_eq!(export_file_name(&[attendee("Ana", "")]), "Asistencia-Capacitacion.pdf");
    }

    #[test]
    fn empty_roster_renders_nothing() {
        assert!(render_sheet(&[], NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()).is_none());
    }

    #[test]
    fn sheet_lists_rows_and_escapes_text() {
        let list = vec![attendee("Ana <b>", "Seguridad"), attendee("Luis", "Seguridad")];
        let html = render_sheet(&list, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()).unwrap();
        assert!(html.contains("PLANILLA DE ASISTENCIA"));
        assert!(html.contains("18 de octubre de 2026"));
        assert!(html.contains("<span>Seguridad</span>"));
        assert!(html.contains("Ana &lt;b&gt;"));
        assert_eq!(html.matches("<img src=\"data:image/png;base64,AAAA\"").count(), 2);
    }

    #[test]
    fn blank_training_falls_back_to_general_course() {
        let html = render_sheet(&[attendee("Ana", " ")], NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()).unwrap();
        assert!(html.contains("Capacitación General"));
        assert!(html.contains("2 de marzo de 2026"));
    }
}
