//! Quadros de visualização em JSON lines

use chuha_core::traits::{SwarmFrame, VisualizationSink};
use std::io::Write;

/// Escreve um objeto JSON por quadro num `Write`
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    out: W,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W> VisualizationSink for JsonLinesSink<W>
where
    W: Write + Send + Sync + std::fmt::Debug,
{
    fn render(&mut self, frame: &SwarmFrame) {
        let line = match serde_json::to_string(frame) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(step = frame.step, error = %e, "failed to encode frame");
                return;
            }
        };
        match writeln!(self.out, "{}", line) {
            Ok(()) => self.written += 1,
            Err(e) => tracing::warn!(step = frame.step, error = %e, "failed to write frame"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chuha_core::geometry::Vec2;

    #[test]
    fn test_one_line_per_frame() {
        let mut sink = JsonLinesSink::new(Vec::new());
        let frame = SwarmFrame {
            step: 7,
            robot: "chuha_1".into(),
            mode: "patrol".into(),
            formation: "circle".into(),
            neighbors: vec![Vec2::new(0.1, 0.2)],
            obstacles: vec![],
            force: Vec2::new(0.0, -1.0),
            formation_quality: 0.0,
        };
        sink.render(&frame);
        sink.render(&frame);
        assert_eq!(sink.written(), 2);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["step"], 7);
        assert_eq!(value["mode"], "patrol");
        assert_eq!(value["neighbors"][0]["y"], 0.2);
    }
}
