//! One-page weight and balance report
//!
//! Walks the table rows top to bottom, then anchors the envelope chart under
//! the totals and overlays the two line pairs.

use chrono::NaiveDate;

use crate::core::aircraft::AircraftProfile;
use crate::report::canvas::{Anchor, Canvas, Color, Font, A4_HEIGHT, A4_WIDTH};
use crate::report::chart::{ChartOverlay, EnvelopeChartMapper, LinePair};
use crate::report::layout::{
    LineItem, ReportLayout, Row, Totals, ARM_HEADING, LOAD_HEADING, MOMENT_HEADING,
    TOTALS_HEADING, WEIGHT_HEADING,
};

/// Page geometry, in points from the bottom left corner
mod page {
    pub const FONT_SIZE: f64 = 12.0;
    pub const NEWLINE: f64 = 15.0;
    pub const HEADER_NEWLINE: f64 = 20.0;
    pub const TOP: f64 = 780.0;
    pub const MARGIN_X: f64 = 30.0;
    pub const DATE_X: f64 = 500.0;
    pub const TABLE_TOP: f64 = 685.0;
    pub const WEIGHT_X: f64 = 170.0;
    pub const ARM_X: f64 = 310.0;
    pub const MOMENT_X: f64 = 420.0;
    /// Widest arm expected in the arm column, used to right align it
    pub const ARM_PLACEHOLDER: &str = "106.805 cm";
    pub const MOMENT_PLACEHOLDER: &str = "Momentx";
    pub const STATION_GAP: f64 = 10.0;
    pub const THIN_LINE: f64 = 0.3;
    pub const CHART_LINE: f64 = 1.25;
    pub const LEGEND_X: f64 = 50.0;
    pub const LEGEND_BOTTOM: f64 = 70.0;
}

pub const TITLE: &str = "Weight and Balance";
pub const DISCLAIMER: &str = "Double check graph for accuracy";

/// Inputs of one report page
#[derive(Debug, Clone, Copy)]
pub struct ReportPage<'a> {
    pub profile: &'a AircraftProfile,
    pub layout: &'a ReportLayout,
    pub mapper: &'a EnvelopeChartMapper,
    pub generated: NaiveDate,
    /// Image reference, usually a `data:` URI
    pub chart_href: &'a str,
}

/// Column positions derived from font metrics
struct Columns {
    weight_right: f64,
    arm_right: f64,
    moment_right: f64,
    times: f64,
    equals: f64,
    label: f64,
}

impl Columns {
    fn measure(canvas: &impl Canvas) -> Self {
        let width = |text: &str| canvas.text_width(text, Font::Courier, page::FONT_SIZE);
        let weight_right = page::WEIGHT_X + width(WEIGHT_HEADING);
        Self {
            weight_right,
            arm_right: page::ARM_X + width(page::ARM_PLACEHOLDER),
            moment_right: page::MOMENT_X + width(page::MOMENT_PLACEHOLDER),
            times: ((page::ARM_X + weight_right) / 2.0).floor(),
            equals: page::MOMENT_X - 20.0,
            label: (page::WEIGHT_X / 2.0).floor(),
        }
    }
}

impl ReportPage<'_> {
    /// Draw the whole page and return the chart overlay that was drawn
    pub fn render(&self, canvas: &mut impl Canvas) -> ChartOverlay {
        canvas.set_line_width(page::THIN_LINE);
        self.header(canvas);
        let anchor_y = self.table(canvas);
        let overlay = self.chart(canvas, anchor_y);
        self.legend(canvas);
        overlay
    }

    fn header(&self, canvas: &mut impl Canvas) {
        let date = self.generated.format("%d/%m/%y").to_string();

        canvas.set_font(Font::HelveticaBold, page::FONT_SIZE);
        canvas.draw_string(page::MARGIN_X, page::TOP, TITLE);
        canvas.set_font(Font::Helvetica, page::FONT_SIZE);
        canvas.draw_string(page::MARGIN_X, page::TOP - page::HEADER_NEWLINE, self.profile.model());
        canvas.draw_string(page::DATE_X, page::TOP, &date);

        let date_width = canvas.text_width(&date, Font::Courier, page::FONT_SIZE);
        let rule_y = page::TOP - page::HEADER_NEWLINE - 5.0;
        canvas.line(page::MARGIN_X, rule_y, page::DATE_X + date_width, rule_y);

        canvas.set_font(Font::Courier, page::FONT_SIZE);
        let mut y = rule_y - page::HEADER_NEWLINE;
        canvas.draw_string(
            page::MARGIN_X,
            y,
            &format!("Aircraft: {}", self.profile.callsign()),
        );
        y -= page::HEADER_NEWLINE;
        canvas.draw_string(
            page::MARGIN_X,
            y,
            &format!(
                "Weighing Date: {}",
                self.profile.calibration_date().format("%d/%m/%y")
            ),
        );
    }

    /// Draw the table and return the baseline of its last line
    fn table(&self, canvas: &mut impl Canvas) -> f64 {
        let cols = Columns::measure(&*canvas);
        let mut y = page::TABLE_TOP;
        let mut in_station = false;

        for row in self.layout.rows() {
            match row {
                Row::Header => {
                    canvas.draw_string(page::WEIGHT_X, y, WEIGHT_HEADING);
                    canvas.draw_string(page::ARM_X, y, ARM_HEADING);
                    canvas.draw_string(page::MOMENT_X, y, MOMENT_HEADING);
                    y -= page::NEWLINE;
                }
                Row::EmptyWeight(item) => {
                    line_item(canvas, &cols, y, item);
                    y -= page::NEWLINE;
                }
                Row::LoadHeading => {
                    canvas.set_font(Font::HelveticaBold, page::FONT_SIZE);
                    underline(canvas, cols.label, y, LOAD_HEADING, Font::HelveticaBold);
                    canvas.set_font(Font::Courier, page::FONT_SIZE);
                    y -= page::NEWLINE;
                }
                Row::Station { label, .. } => {
                    if in_station {
                        y -= page::NEWLINE + page::STATION_GAP;
                    }
                    in_station = true;
                    canvas.draw_string(cols.label, y, label);
                }
                Row::Load(item) => {
                    y -= page::NEWLINE;
                    let name = item.name.as_deref().unwrap_or_default();
                    canvas.draw_string(cols.label, y, &format!("  – {}", name));
                    line_item(canvas, &cols, y, item);
                }
                Row::Totals(totals) => {
                    if in_station {
                        y -= page::NEWLINE + page::STATION_GAP;
                    }
                    y = self.totals(canvas, &cols, y, totals);
                }
            }
        }
        y
    }

    fn totals(&self, canvas: &mut impl Canvas, cols: &Columns, mut y: f64, totals: &Totals) -> f64 {
        canvas.set_font(Font::HelveticaBold, page::FONT_SIZE);
        canvas.draw_string(cols.label, y, TOTALS_HEADING);
        let rule_end = page::MOMENT_X + canvas.text_width(MOMENT_HEADING, Font::Courier, page::FONT_SIZE);
        canvas.line(cols.label, y - 2.0, rule_end, y - 2.0);

        canvas.set_font(Font::Courier, page::FONT_SIZE);
        y -= page::NEWLINE;
        canvas.draw_right_string(cols.weight_right, y, &totals.weight_text());
        canvas.draw_right_string(cols.moment_right, y, &totals.moment_text());
        y -= page::NEWLINE;
        let shift = canvas.text_width("Weight", Font::Courier, page::FONT_SIZE);
        canvas.draw_right_string(page::WEIGHT_X + shift, y, &totals.cog_text());
        y
    }

    fn chart(&self, canvas: &mut impl Canvas, anchor_y: f64) -> ChartOverlay {
        let placement = self.mapper.image_placement(anchor_y, A4_WIDTH, A4_HEIGHT);
        canvas.draw_image(
            self.chart_href,
            placement.center_x,
            placement.center_y,
            placement.width,
            placement.height,
            Anchor::Center,
        );

        let origin_y = self.mapper.origin_y(anchor_y);
        let overlay = self.mapper.overlay(self.layout.summary(), origin_y);

        canvas.set_line_width(page::CHART_LINE);
        canvas.set_stroke_color(Color::BLACK);
        draw_pair(canvas, &overlay.with_fuel);
        canvas.set_stroke_color(Color::RED);
        draw_pair(canvas, &overlay.without_fuel);
        overlay
    }

    fn legend(&self, canvas: &mut impl Canvas) {
        let y = page::LEGEND_BOTTOM + page::NEWLINE;
        let size = page::FONT_SIZE / 2.0;
        let red_label = "Red line";

        canvas.set_fill_color(Color::RED);
        canvas.set_font(Font::Helvetica, size);
        let label_width = canvas.text_width(red_label, Font::Helvetica, size);
        canvas.draw_string(page::LEGEND_X, y, red_label);
        canvas.set_fill_color(Color::BLACK);
        canvas.draw_string(page::LEGEND_X + label_width, y, ": no usable fuel");
        canvas.draw_string(page::LEGEND_X, y - page::NEWLINE / 2.0, "Black line: with fuel");
        canvas.set_font(Font::HelveticaOblique, size);
        canvas.draw_string(
            page::LEGEND_X,
            y - page::NEWLINE - page::NEWLINE / 2.0,
            DISCLAIMER,
        );
    }
}

fn line_item(canvas: &mut impl Canvas, cols: &Columns, y: f64, item: &LineItem) {
    canvas.draw_right_string(cols.weight_right, y, &item.weight_text());
    canvas.draw_string(cols.times, y, "x");
    canvas.draw_right_string(cols.arm_right, y, &item.arm_text());
    canvas.draw_string(cols.equals, y, "=");
    canvas.draw_right_string(cols.moment_right, y, &item.moment_text());
}

fn underline(canvas: &mut impl Canvas, x: f64, y: f64, text: &str, font: Font) {
    let width = canvas.text_width(text, font, page::FONT_SIZE);
    canvas.draw_string(x, y, text);
    canvas.line(x, y - 2.0, x + width, y - 2.0);
}

fn draw_pair(canvas: &mut impl Canvas, pair: &LinePair) {
    for segment in [pair.cog, pair.weight] {
        canvas.line(segment.x1, segment.y1, segment.x2, segment.y2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aircraft::Station;
    use crate::core::balance::BalanceCalculator;
    use crate::core::manifest::LoadManifest;
    use crate::report::chart::C172S_ENVELOPE;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Text { x: f64, y: f64, text: String, right: bool },
        Line { x1: f64, y1: f64, x2: f64, y2: f64, color: Color },
        Image { x: f64, y: f64, width: f64, height: f64 },
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
        stroke: Option<Color>,
    }

    impl Canvas for Recorder {
        fn set_font(&mut self, _font: Font, _size: f64) {}

        fn draw_string(&mut self, x: f64, y: f64, text: &str) {
            self.ops.push(Op::Text { x, y, text: text.to_string(), right: false });
        }

        fn draw_right_string(&mut self, x: f64, y: f64, text: &str) {
            self.ops.push(Op::Text { x, y, text: text.to_string(), right: true });
        }

        fn set_line_width(&mut self, _width: f64) {}

        fn set_stroke_color(&mut self, color: Color) {
            self.stroke = Some(color);
        }

        fn set_fill_color(&mut self, _color: Color) {}

        fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
            let color = self.stroke.unwrap_or(Color::BLACK);
            self.ops.push(Op::Line { x1, y1, x2, y2, color });
        }

        fn draw_image(&mut self, _href: &str, x: f64, y: f64, width: f64, height: f64, _anchor: Anchor) {
            self.ops.push(Op::Image { x, y, width, height });
        }
    }

    fn render(manifest: &LoadManifest) -> (Recorder, ChartOverlay) {
        let profile = AircraftProfile::create("D-EXAV").unwrap();
        let calc = BalanceCalculator::new(&profile, manifest);
        let layout = ReportLayout::build(&calc).unwrap();
        let mapper = EnvelopeChartMapper::new(C172S_ENVELOPE).unwrap();
        let page = ReportPage {
            profile: &profile,
            layout: &layout,
            mapper: &mapper,
            generated: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            chart_href: "wb_c172s.png",
        };
        let mut recorder = Recorder::default();
        let overlay = page.render(&mut recorder);
        (recorder, overlay)
    }

    fn text_at(recorder: &Recorder, needle: &str) -> (f64, f64) {
        recorder
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Text { x, y, text, .. } if text == needle => Some((*x, *y)),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no text {needle:?}"))
    }

    fn pilot_and_fuel() -> LoadManifest {
        let mut manifest = LoadManifest::new();
        manifest.load(80.0, Station::FrontSeats, "pilot");
        manifest.fuel(100.0);
        manifest
    }

    #[test]
    fn test_header_and_calibration_block() {
        let (recorder, _) = render(&pilot_and_fuel());
        assert_eq!(text_at(&recorder, TITLE), (30.0, 780.0));
        assert_eq!(text_at(&recorder, "Cessna 172S"), (30.0, 760.0));
        assert_eq!(text_at(&recorder, "01/06/24"), (500.0, 780.0));
        assert_eq!(text_at(&recorder, "Aircraft: D-EXAV"), (30.0, 735.0));
        assert_eq!(text_at(&recorder, "Weighing Date: 10/05/22"), (30.0, 715.0));
    }

    #[test]
    fn test_table_positions() {
        let (recorder, _) = render(&pilot_and_fuel());
        assert_eq!(text_at(&recorder, "Empty Weight"), (170.0, 685.0));
        assert_eq!(text_at(&recorder, "749 kg"), (256.4, 670.0));
        assert_eq!(text_at(&recorder, "Load"), (85.0, 655.0));
        assert_eq!(text_at(&recorder, "Front seats"), (85.0, 640.0));
        assert_eq!(text_at(&recorder, "  – Pilot"), (85.0, 625.0));
        assert_eq!(text_at(&recorder, "Fuel"), (85.0, 600.0));
        assert_eq!(text_at(&recorder, "  – Fuel"), (85.0, 585.0));
        assert_eq!(text_at(&recorder, "Totals"), (85.0, 560.0));
        assert_eq!(text_at(&recorder, "Weight: 900.0 kg").1, 545.0);
        assert_eq!(text_at(&recorder, "CoG: 106.86"), (213.2, 530.0));
    }

    #[test]
    fn test_chart_is_anchored_below_totals() {
        let (recorder, overlay) = render(&pilot_and_fuel());
        let image = recorder
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Image { x, y, width, height } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .unwrap();
        assert_eq!(image, (297.0, 340.0, 258.0, 366.0));

        assert_eq!(overlay.with_fuel.cog.y1, 480.0);
        assert_eq!(overlay.with_fuel.cog.y2, 195.0);
    }

    #[test]
    fn test_overlay_lines_are_drawn_in_scenario_colors() {
        let (recorder, overlay) = render(&pilot_and_fuel());
        let lines: Vec<_> = recorder
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Line { x1, y1, x2, y2, color } => Some((*x1, *y1, *x2, *y2, *color)),
                _ => None,
            })
            .collect();
        let last_four = &lines[lines.len() - 4..];

        let w = overlay.with_fuel;
        let n = overlay.without_fuel;
        assert_eq!(last_four[0], (w.cog.x1, w.cog.y1, w.cog.x2, w.cog.y2, Color::BLACK));
        assert_eq!(last_four[1].4, Color::BLACK);
        assert_eq!(last_four[2], (n.cog.x1, n.cog.y1, n.cog.x2, n.cog.y2, Color::RED));
        assert_eq!(last_four[3], (n.weight.x1, n.weight.y1, n.weight.x2, n.weight.y2, Color::RED));
    }

    #[test]
    fn test_legend() {
        let (recorder, _) = render(&pilot_and_fuel());
        assert_eq!(text_at(&recorder, "Red line"), (50.0, 85.0));
        assert_eq!(text_at(&recorder, "Black line: with fuel"), (50.0, 77.5));
        assert_eq!(text_at(&recorder, DISCLAIMER), (50.0, 62.5));
    }

    #[test]
    fn test_rendering_twice_is_identical() {
        let manifest = pilot_and_fuel();
        let (first, overlay_a) = render(&manifest);
        let (second, overlay_b) = render(&manifest);
        assert_eq!(first.ops, second.ops);
        assert_eq!(overlay_a, overlay_b);
    }
}
