use std::io::Write;

use crate::fleet::TrackedUnit;

use super::{FleetView, Screen, SingleUnitView};

enum Layout {
    Fleet(FleetView),
    SingleUnit(SingleUnitView),
}

/// Plain-text rendering of a screen, one block per render.
pub struct TerminalScreen<W> {
    layout: Layout,
    out: W,
    frame: u64,
}

impl<W: Write + Send + 'static> TerminalScreen<W> {
    pub fn fleet(view: FleetView, out: W) -> Self {
        Self {
            layout: Layout::Fleet(view),
            out,
            frame: 0,
        }
    }

    pub fn single_unit(view: SingleUnitView, out: W) -> Self {
        Self {
            layout: Layout::SingleUnit(view),
            out,
            frame: 0,
        }
    }

    fn draw(&mut self, units: &[TrackedUnit]) -> std::io::Result<()> {
        writeln!(self.out, "--- frame {} ---", self.frame)?;
        match &self.layout {
            Layout::Fleet(view) => {
                let panel = view.panel(units);
                writeln!(
                    self.out,
                    "Live Fleet Tracking (center {:.4}, {:.4} @ zoom {})",
                    panel.map.center.lat, panel.map.center.lng, panel.map.zoom
                )?;
                for card in &panel.cards {
                    writeln!(
                        self.out,
                        "Bus #{:<3} {:<14} [{}] {} | {} | {} | {} | updated {}",
                        card.id,
                        card.status,
                        card.color,
                        card.driver,
                        card.phone,
                        card.route,
                        card.location,
                        card.updated
                    )?;
                }
            }
            Layout::SingleUnit(view) => match view.panel(units) {
                Some(panel) => {
                    writeln!(self.out, "{}", panel.title)?;
                    writeln!(
                        self.out,
                        "Bus #{} [{}] {} | driver {} | {}",
                        panel.card.id,
                        panel.indicator,
                        panel.card.status,
                        panel.driver_name,
                        panel.card.route
                    )?;
                    writeln!(self.out, "Current location: {}", panel.card.location)?;
                    writeln!(self.out, "Last updated: {}", panel.card.updated)?;
                }
                None => writeln!(self.out, "Bus #{} is not in the fleet", view.unit_id())?,
            },
        }
        self.out.flush()
    }
}

impl<W: Write + Send + 'static> Screen for TerminalScreen<W> {
    fn render(&mut self, units: &[TrackedUnit]) {
        if let Err(e) = self.draw(units) {
            log::warn!("Failed to draw frame {}: {}", self.frame, e);
        }
        self.frame += 1;
    }
}
