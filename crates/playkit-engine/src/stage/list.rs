use super::{Sprite, SpriteCmd, SpriteId};

/// Owned sprite container.
///
/// Performance characteristics:
/// - `insert` and iteration are O(1) amortized / O(n)
/// - `remove` and id lookup are O(n); stages are expected to stay small
///
/// Draw order is insertion order; there is no z-index. A host that needs
/// layering keeps one stage per layer.
#[derive(Default)]
pub struct Stage {
    sprites: Vec<(SpriteId, Sprite)>,
    next_id: u64,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn insert(&mut self, sprite: Sprite) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        self.sprites.push((id, sprite));
        id
    }

    /// Removes a sprite, returning it if it was present.
    pub fn remove(&mut self, id: SpriteId) -> Option<Sprite> {
        let i = self.sprites.iter().position(|(sid, _)| *sid == id)?;
        Some(self.sprites.remove(i).1)
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, sprite)| sprite)
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites
            .iter_mut()
            .find(|(sid, _)| *sid == id)
            .map(|(_, sprite)| sprite)
    }

    /// Advances every sprite one frame: `position += motion`,
    /// `rotation += spin`, then the sprite's hook (if any).
    ///
    /// Motion and spin are per-frame quantities, matching a fixed-rate loop;
    /// time-based movement belongs in hooks, which receive the measured
    /// `delta_ms`.
    pub fn update(&mut self, delta_ms: f64) {
        for (_, sprite) in self.sprites.iter_mut() {
            let state = &mut sprite.state;
            state.position = state.position + state.motion;
            state.rotation_deg += state.spin_deg;
            if let Some(hook) = sprite.hook.as_mut() {
                hook(&mut sprite.state, delta_ms);
            }
        }
    }

    /// Appends one draw command per sprite, in insertion order.
    pub fn draw(&self, out: &mut Vec<SpriteCmd>) {
        for (_, sprite) in &self.sprites {
            let state = &sprite.state;
            out.push(SpriteCmd {
                image: state.image.clone(),
                center: state.position,
                size: state.size,
                rotation_deg: state.rotation_deg,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;

    fn sprite(image: &str) -> Sprite {
        Sprite::new(image, Vec2::splat(10.0))
    }

    // ── container ─────────────────────────────────────────────────────────

    #[test]
    fn insert_and_remove_round_trip() {
        let mut stage = Stage::new();
        let id = stage.insert(sprite("a"));
        assert_eq!(stage.len(), 1);

        let removed = stage.remove(id).unwrap();
        assert_eq!(removed.state.image, "a");
        assert!(stage.is_empty());
        assert!(stage.remove(id).is_none());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut stage = Stage::new();
        let a = stage.insert(sprite("a"));
        stage.remove(a);
        let b = stage.insert(sprite("b"));
        assert_ne!(a, b);
        assert!(stage.get(a).is_none());
        assert_eq!(stage.get(b).unwrap().state.image, "b");
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut stage = Stage::new();
        let id = stage.insert(sprite("a"));
        stage.get_mut(id).unwrap().state.position = Vec2::new(5.0, 6.0);
        assert_eq!(stage.get(id).unwrap().state.position, Vec2::new(5.0, 6.0));
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn update_integrates_motion_and_spin_per_frame() {
        let mut stage = Stage::new();
        let id = stage.insert(
            sprite("a")
                .at(Vec2::new(10.0, 20.0))
                .with_motion(Vec2::new(1.0, -2.0))
                .with_spin(15.0),
        );

        stage.update(16.7);
        stage.update(16.7);

        let s = &stage.get(id).unwrap().state;
        assert_eq!(s.position, Vec2::new(12.0, 16.0));
        assert_eq!(s.rotation_deg, 30.0);
    }

    #[test]
    fn hook_runs_after_integration_with_the_delta() {
        let mut stage = Stage::new();
        let id = stage.insert(
            sprite("a")
                .with_motion(Vec2::new(1.0, 0.0))
                .with_hook(|state, delta_ms| {
                    // Integration happened first: x is already advanced.
                    state.position.y = state.position.x + delta_ms as f32;
                }),
        );

        stage.update(3.0);

        let s = &stage.get(id).unwrap().state;
        assert_eq!(s.position, Vec2::new(1.0, 4.0));
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn draw_emits_in_insertion_order() {
        let mut stage = Stage::new();
        stage.insert(sprite("first").at(Vec2::new(1.0, 1.0)));
        stage.insert(sprite("second").with_rotation(90.0));

        let mut cmds = Vec::new();
        stage.draw(&mut cmds);

        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].image, "first");
        assert_eq!(cmds[0].center, Vec2::new(1.0, 1.0));
        assert_eq!(cmds[1].image, "second");
        assert_eq!(cmds[1].rotation_deg, 90.0);
    }

    #[test]
    fn draw_order_survives_a_middle_removal() {
        let mut stage = Stage::new();
        stage.insert(sprite("a"));
        let b = stage.insert(sprite("b"));
        stage.insert(sprite("c"));
        stage.remove(b);

        let mut cmds = Vec::new();
        stage.draw(&mut cmds);
        let names: Vec<&str> = cmds.iter().map(|c| c.image.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }
}
