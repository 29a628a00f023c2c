//! The prediction card.

use flightontime_sdk::PredictionResult;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::named_color;
use crate::i18n::T;

pub fn render(f: &mut Frame, area: Rect, result: &PredictionResult, t: &T) {
    let color = named_color(result.risk_tier().color());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", result.route_label()),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let label = Style::default().add_modifier(Modifier::DIM);
    let details = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("{}: ", t.carrier), label),
            Span::raw(result.carrier.as_str()),
        ]),
        Line::from(vec![
            Span::styled(format!("{}: ", t.departure), label),
            Span::raw(result.departure_local.as_str()),
        ]),
        Line::from(vec![
            Span::styled(format!("{}: ", t.forecast), label),
            Span::styled(
                result.forecast_label.as_str(),
                Style::default().fg(named_color(&result.color_hint)),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("{}: ", t.delay_risk), label),
            Span::styled(
                result.risk_tier().to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
    ]);
    f.render_widget(details, rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(result.probability)
        .label(format!("{} {}", t.probability, result.percent_label()));
    f.render_widget(gauge, rows[1]);
}

/// Plain-text card for one-shot output.
pub fn to_text(result: &PredictionResult, t: &T) -> String {
    format!(
        "{route}\n  {carrier_label}: {carrier}\n  {departure_label}: {departure}\n  {forecast_label}: {forecast}\n  {risk_label}: {tier}\n  {probability_label}: {percent}\n",
        route = result.route_label(),
        carrier_label = t.carrier,
        carrier = result.carrier,
        departure_label = t.departure,
        departure = result.departure_local,
        forecast_label = t.forecast,
        forecast = result.forecast_label,
        risk_label = t.delay_risk,
        tier = result.risk_tier(),
        probability_label = t.probability,
        percent = result.percent_label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{t, Locale};
    use chrono::{TimeZone, Utc};
    use flightontime_models::{IataCode, PredictionRequest, PredictionResponse, RiskPolicy};
    use ratatui::{backend::TestBackend, style::Color, Terminal};

    fn result(probability: f64) -> PredictionResult {
        result_with(probability, "🔴 ATRASO PROVÁVEL", "red")
    }

    fn result_with(probability: f64, label: &str, hint: &str) -> PredictionResult {
        let request = PredictionRequest {
            carrier: "LATAM".into(),
            origin: IataCode::parse("GRU").unwrap(),
            destination: IataCode::parse("GIG").unwrap(),
            departure_utc: Utc.with_ymd_and_hms(2025, 3, 14, 21, 30, 0).unwrap(),
        };
        let response = PredictionResponse {
            forecast_label: label.into(),
            probability,
            color_hint: hint.into(),
            details: serde_json::Value::Null,
        };
        PredictionResult::new(&request, "2025-03-14T18:30", response, &RiskPolicy::default())
            .unwrap()
    }

    #[test]
    fn text_card_lists_every_field() {
        let text = to_text(&result(0.75), &t(Locale::Pt));
        assert!(text.starts_with("GRU → GIG\n"));
        assert!(text.contains("Companhia: LATAM"));
        assert!(text.contains("Partida: 2025-03-14T18:30"));
        assert!(text.contains("Risco de atraso: ALTO"));
        assert!(text.contains("Probabilidade: 75%"));
    }

    #[test]
    fn renders_route_and_tier() {
        let mut terminal = Terminal::new(TestBackend::new(50, 8)).unwrap();
        terminal
            .draw(|f| render(f, f.area(), &result(0.2), &t(Locale::En)))
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("GRU → GIG"));
        assert!(screen.contains("BAIXO"));
        assert!(screen.contains("20%"));
    }

    #[test]
    fn forecast_uses_backend_hint_and_frame_uses_tier() {
        let mut terminal = Terminal::new(TestBackend::new(50, 8)).unwrap();
        terminal
            .draw(|f| render(f, f.area(), &result_with(0.65, "ALERTA", "yellow"), &t(Locale::En)))
            .unwrap();
        let cells = terminal.backend().buffer().content();
        let symbols: Vec<&str> = cells.iter().map(|cell| cell.symbol()).collect();
        let at = symbols
            .windows(6)
            .position(|w| w.concat() == "ALERTA")
            .unwrap();

        assert_eq!(cells[at].fg, Color::Yellow);
        // Default policy puts 0.65 in the high tier.
        assert_eq!(cells[0].fg, Color::Red);
    }
}
