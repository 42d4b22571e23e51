use glam::Vec2;
use roomstage_input::PointerEvent;

/// Builder for press / move / release sequences.
#[derive(Debug, Clone)]
pub struct DragGesture {
    viewport: (u32, u32),
    cursor: Vec2,
    events: Vec<PointerEvent>,
}

impl DragGesture {
    /// Start with a press at `position`.
    pub fn press_at(position: Vec2, viewport: (u32, u32)) -> Self {
        Self {
            viewport,
            cursor: position,
            events: vec![PointerEvent::down(position, viewport)],
        }
    }

    /// Move the pointer by `delta` pixels.
    pub fn move_by(mut self, delta: Vec2) -> Self {
        self.cursor += delta;
        self.events.push(PointerEvent::moved(self.cursor, self.viewport));
        self
    }

    /// Move by `total` pixels split into `steps` equal events.
    pub fn move_in_steps(mut self, total: Vec2, steps: u32) -> Self {
        let steps = steps.max(1);
        let step = total / steps as f32;
        for _ in 0..steps {
            self = self.move_by(step);
        }
        self
    }

    /// Release at the current position.
    pub fn release(mut self) -> Self {
        self.events.push(PointerEvent::up(self.cursor, self.viewport));
        self
    }

    /// The built events.
    pub fn events(&self) -> &[PointerEvent] {
        &self.events
    }

    /// Consume the builder.
    pub fn into_events(self) -> Vec<PointerEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomstage_input::PointerKind;

    #[test]
    fn builds_press_moves_release() {
        let gesture = DragGesture::press_at(Vec2::new(10.0, 10.0), (100, 100))
            .move_in_steps(Vec2::new(30.0, 0.0), 3)
            .release();
        let kinds: Vec<_> = gesture.events().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                PointerKind::Down,
                PointerKind::Move,
                PointerKind::Move,
                PointerKind::Move,
                PointerKind::Up
            ]
        );
        assert_eq!(gesture.events()[4].position, Vec2::new(40.0, 10.0));
    }
}
