// Incremental, character-by-character story text reveal.
// Each render gets a generation token; ticks carrying an older token are dropped,
// so a superseded reveal can never write into the surface again.

/// Narrow view of the element the story text is written into.
pub trait TextSurface {
    fn clear(&mut self);
    fn append(&mut self, ch: char);
}

/// Identifies one render. Only the most recent token is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderToken(u64);

/// Result of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A character was revealed and more remain.
    Revealed,
    /// The full text is on the surface; the timer should stop.
    Finished,
    /// A newer render replaced this one; the timer should stop.
    Superseded,
}

impl Tick {
    pub fn should_stop(&self) -> bool {
        !matches!(self, Tick::Revealed)
    }
}

pub struct TypewriterRenderer<S: TextSurface> {
    surface: S,
    generation: u64,
    chars: Vec<char>,
    position: usize,
    interval_ms: u32,
}

impl<S: TextSurface> TypewriterRenderer<S> {
    pub fn new(surface: S, interval_ms: u32) -> Self {
        TypewriterRenderer {
            surface,
            generation: 0,
            chars: Vec::new(),
            position: 0,
            interval_ms,
        }
    }

    /// Start revealing `text`, cancelling whatever render was in flight.
    /// The caller drives the reveal by calling [`tick`](Self::tick) every
    /// [`interval_ms`](Self::interval_ms) with the returned token.
    pub fn render(&mut self, text: &str) -> RenderToken {
        self.generation += 1;
        self.surface.clear();
        self.chars = text.chars().collect();
        self.position = 0;
        RenderToken(self.generation)
    }

    pub fn tick(&mut self, token: RenderToken) -> Tick {
        if !self.is_current(token) {
            return Tick::Superseded;
        }

        if let Some(&ch) = self.chars.get(self.position) {
            self.surface.append(ch);
            self.position += 1;
        }

        if self.position >= self.chars.len() {
            Tick::Finished
        } else {
            Tick::Revealed
        }
    }

    pub fn is_current(&self, token: RenderToken) -> bool {
        token.0 == self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.chars.len()
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}


#[cfg(test)]
mod tests {
    use super::testing::BufferText;
    use super::*;
    use proptest::prelude::*;

    fn run_to_end(renderer: &mut TypewriterRenderer<BufferText>, token: RenderToken) {
        while !renderer.tick(token).should_stop() {}
    }

    #[test]
    fn reveals_one_character_per_tick() {
        let mut renderer = TypewriterRenderer::new(BufferText::default(), 15);
        let token = renderer.render("abc");
        assert_eq!(renderer.surface().text, "");
        assert_eq!(renderer.tick(token), Tick::Revealed);
        assert_eq!(renderer.surface().text, "a");
        assert_eq!(renderer.tick(token), Tick::Revealed);
        assert_eq!(renderer.tick(token), Tick::Finished);
        assert_eq!(renderer.surface().text, "abc");
        assert_eq!(renderer.tick(token), Tick::Finished);
        assert_eq!(renderer.surface().text, "abc");
    }

    #[test]
    fn multibyte_text_is_revealed_by_char() {
        let mut renderer = TypewriterRenderer::new(BufferText::default(), 15);
        let token = renderer.render("📍 Kolkata…");
        renderer.tick(token);
        assert_eq!(renderer.surface().text, "📍");
        run_to_end(&mut renderer, token);
        assert_eq!(renderer.surface().text, "📍 Kolkata…");
    }

    #[test]
    fn empty_text_finishes_immediately() {
        let mut renderer = TypewriterRenderer::new(BufferText::default(), 15);
        let token = renderer.render("");
        assert_eq!(renderer.tick(token), Tick::Finished);
        assert!(renderer.is_finished());
    }

    #[test]
    fn second_render_supersedes_first() {
        let mut renderer = TypewriterRenderer::new(BufferText::default(), 15);
        let first = renderer.render("first story");
        renderer.tick(first);
        renderer.tick(first);

        let second = renderer.render("second");
        assert_eq!(renderer.surface().text, "");
        assert_eq!(renderer.tick(first), Tick::Superseded);
        assert!(!renderer.is_current(first));

        run_to_end(&mut renderer, second);
        assert_eq!(renderer.surface().text, "second");
    }

    proptest! {
        #[test]
        fn stale_ticks_never_interleave(
            first in "[a-m]{0,40}",
            second in "[n-z]{0,40}",
            early_ticks in 0usize..20,
            stale_ticks in prop::collection::vec(any::<bool>(), 0..80),
        ) {
            let mut renderer = TypewriterRenderer::new(BufferText::default(), 15);
            let old = renderer.render(&first);
            for _ in 0..early_ticks {
                renderer.tick(old);
            }

            let new = renderer.render(&second);
            for stale in stale_ticks {
                let token = if stale { old } else { new };
                renderer.tick(token);
                prop_assert!(second.starts_with(renderer.surface().text.as_str()));
            }
            run_to_end(&mut renderer, new);
            prop_assert_eq!(&renderer.surface().text, &second);
        }
    }
}
