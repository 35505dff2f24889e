use super::routes::{ALIGNMENT_PARAM, APPLIED_PARAM, ZONE_PARAM};
use crate::view::ViewModel;
use std::collections::BTreeSet;

const DARK_GRAY: &str = "#333333";
const LIGHT_GRAY: &str = "#E0E0E0";
const WHITE: &str = "#FFFFFF";

/// Render the full dashboard page: title banner, two multi-select filters and
/// the inline SVG chart. Changing either filter resubmits the form.
pub fn render_page(view: &ViewModel) -> String {
    let title = escape_html(&view.title);
    let zone_select = multi_select(
        ZONE_PARAM,
        "Select Field Zone(s):",
        &view.zone_options,
        &view.selection.zones,
    );
    let alignment_select = multi_select(
        ALIGNMENT_PARAM,
        "Select Defensive Alignment(s):",
        &view.alignment_options,
        &view.selection.alignments,
    );

    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
<style>\
body{{font-family:Arial,sans-serif;background:{WHITE};padding:20px;color:{DARK_GRAY};}}\
.banner{{padding:10px;background:{LIGHT_GRAY};border-radius:10px;margin-bottom:15px;}}\
.banner h1{{font-family:'Arial Black',Arial,sans-serif;margin:0 20px;text-align:center;}}\
.filters{{display:flex;justify-content:space-between;margin-bottom:30px;}}\
.filter{{width:48%;}}\
.filter label{{font-weight:bold;display:block;margin-bottom:4px;}}\
.filter select{{width:100%;color:{DARK_GRAY};}}\
.chart{{margin-top:40px;}}\
</style></head><body>\
<div class=\"banner\"><h1>{title}</h1></div>\
<form method=\"get\" action=\"/\">\
<input type=\"hidden\" name=\"{APPLIED_PARAM}\" value=\"1\">\
<div class=\"filters\">{zone_select}{alignment_select}</div>\
</form>\
<div class=\"chart\" id=\"epa-heatmap\">{chart}</div>\
</body></html>",
        chart = view.chart.svg(),
    )
}

fn multi_select(name: &str, label: &str, options: &[String], selected: &BTreeSet<String>) -> String {
    let mut html = format!(
        "<div class=\"filter\"><label for=\"{name}-filter\">{label}</label>\
<select id=\"{name}-filter\" name=\"{name}\" multiple size=\"{size}\" onchange=\"this.form.submit()\">",
        size = options.len().clamp(2, 8),
    );
    for option in options {
        let value = escape_html(option);
        let mark = if selected.contains(option) { " selected" } else { "" };
        html.push_str(&format!("<option value=\"{value}\"{mark}>{value}</option>"));
    }
    html.push_str("</select></div>");
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Selection;
    use crate::view::ChartView;

    fn view(selection: Selection) -> ViewModel {
        ViewModel {
            title: "Passing Defense Dashboard".to_string(),
            zone_options: vec!["Backed Up".to_string(), "Midfield".to_string()],
            alignment_options: vec!["Cover 2 & Man".to_string(), "Zone".to_string()],
            selection,
            chart: ChartView::NoData {
                title: "No data for selected filters".to_string(),
                message: "No data to display".to_string(),
                svg: "<svg></svg>".to_string(),
            },
        }
    }

    #[test]
    fn page_marks_selected_options_and_escapes_labels() {
        let html = render_page(&view(Selection::new(["Midfield"], ["Zone"])));
        assert!(html.contains("<option value=\"Midfield\" selected>Midfield</option>"));
        assert!(html.contains("<option value=\"Backed Up\">Backed Up</option>"));
        assert!(html.contains("Cover 2 &amp; Man"));
        assert!(html.contains("<option value=\"Zone\" selected>Zone</option>"));
    }

    #[test]
    fn page_embeds_chart_and_resubmits_on_change() {
        let html = render_page(&view(Selection::default()));
        assert!(html.contains("<svg></svg>"));
        assert!(html.contains("onchange=\"this.form.submit()\""));
        assert!(html.contains("name=\"applied\" value=\"1\""));
        assert!(html.contains("<h1>Passing Defense Dashboard</h1>"));
    }
}
