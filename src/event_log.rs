use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Grid interactions worth recording during a session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum GridEvent {
    /// A tile was clicked (x, y)
    TileClicked { x: i32, y: i32 },
    /// The cursor entered a tile (x, y)
    HoverStart { x: i32, y: i32 },
    /// The cursor left a tile (x, y)
    HoverEnd { x: i32, y: i32 },
    /// The board was resized
    Resize { width: i32, height: i32 },
    /// A tile's movement cost changed (x, y, cost; None = impassable)
    CostChanged { x: i32, y: i32, cost: Option<f32> },
}

/// Logged event with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    /// The event
    pub event: GridEvent,
}

/// Interaction logger
pub struct EventLog {
    start_time: Instant,
    events: Vec<LoggedEvent>,
}

impl Default for EventLog {
    fn default() -> Self {
        EventLog::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        EventLog {
            start_time: Instant::now(),
            events: Vec::new(),
        }
    }

    /// Record an event with the current timestamp
    pub fn log(&mut self, event: GridEvent) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.events.push(LoggedEvent {
            timestamp_ms,
            event,
        });
    }

    /// All recorded events in order
    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Print log to console
    pub fn print(&self) {
        println!("\n=== Event Log ({} events) ===", self.events.len());
        for (i, logged) in self.events.iter().enumerate() {
            println!(
                "[{:6}ms] #{:3} {:?}",
                logged.timestamp_ms,
                i + 1,
                logged.event
            );
        }
        println!("=== End of Log ===\n");
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut clicks = 0;
        let mut hovers = 0;
        let mut resizes = 0;
        let mut cost_edits = 0;

        for logged in &self.events {
            match logged.event {
                GridEvent::TileClicked { .. } => clicks += 1,
                GridEvent::HoverStart { .. } => hovers += 1,
                GridEvent::HoverEnd { .. } => {}
                GridEvent::Resize { .. } => resizes += 1,
                GridEvent::CostChanged { .. } => cost_edits += 1,
            }
        }

        let duration = self.events.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Clicks: {}, Hovers: {}, Resizes: {}, Cost Edits: {}",
            duration,
            self.events.len(),
            clicks,
            hovers,
            resizes,
            cost_edits
        )
    }
}
