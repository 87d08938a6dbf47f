//! Ordered, in-memory equation collection.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ColorParseError;
use crate::render::Color;

static EQUATION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Colors assigned to new equations, cycled by insertion count.
pub const PALETTE: [Color; 6] = [
    Color::hex(0x2563eb),
    Color::hex(0xdc2626),
    Color::hex(0x16a34a),
    Color::hex(0x9333ea),
    Color::hex(0xea580c),
    Color::hex(0x0891b2),
];

/// Unique identifier for an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EquationId(u64);

impl EquationId {
    fn next() -> Self {
        Self(EQUATION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// One user equation.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    id: EquationId,
    expression: String,
    color: Color,
    visible: bool,
}

impl Equation {
    /// Access the equation id.
    pub fn id(&self) -> EquationId {
        self.id
    }

    /// Expression source text.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Check whether the equation is drawn.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

type StoreListener = Box<dyn FnMut() + Send + Sync>;

/// Equations in insertion order.
///
/// Mutations that find their target bump [`generation`](Self::generation)
/// and notify subscribers. Mutations on unknown ids return `false` and
/// leave the store untouched.
#[derive(Default)]
pub struct EquationStore {
    equations: Vec<Equation>,
    generation: u64,
    listeners: Vec<StoreListener>,
}

impl EquationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an equation, colored from [`PALETTE`].
    pub fn add(&mut self, expression: impl Into<String>) -> EquationId {
        let id = EquationId::next();
        let color = PALETTE[self.equations.len() % PALETTE.len()];
        self.equations.push(Equation {
            id,
            expression: expression.into(),
            color,
            visible: true,
        });
        self.changed();
        id
    }

    /// Remove an equation.
    pub fn remove(&mut self, id: EquationId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.equations.remove(index);
        self.changed();
        true
    }

    /// Replace an equation's expression text.
    pub fn update_expression(&mut self, id: EquationId, expression: impl Into<String>) -> bool {
        self.modify(id, |equation| equation.expression = expression.into())
    }

    /// Set an equation's stroke color.
    pub fn set_color(&mut self, id: EquationId, color: Color) -> bool {
        self.modify(id, |equation| equation.color = color)
    }

    /// Set an equation's color from `#rrggbb` or `#rgb`.
    pub fn set_color_hex(&mut self, id: EquationId, hex: &str) -> Result<bool, ColorParseError> {
        let color = Color::from_hex(hex)?;
        Ok(self.set_color(id, color))
    }

    /// Advance an equation's color to the next palette entry.
    ///
    /// Colors outside the palette restart at its first entry.
    pub fn cycle_color(&mut self, id: EquationId) -> bool {
        self.modify(id, |equation| {
            let next = PALETTE
                .iter()
                .position(|color| *color == equation.color)
                .map_or(0, |index| (index + 1) % PALETTE.len());
            equation.color = PALETTE[next];
        })
    }

    /// Flip an equation's visibility.
    pub fn toggle_visibility(&mut self, id: EquationId) -> bool {
        self.modify(id, |equation| equation.visible = !equation.visible)
    }

    /// Show or hide an equation.
    pub fn set_visible(&mut self, id: EquationId, visible: bool) -> bool {
        self.modify(id, |equation| equation.visible = visible)
    }

    /// Look up an equation.
    pub fn get(&self, id: EquationId) -> Option<&Equation> {
        self.equations.iter().find(|equation| equation.id == id)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Equation> + '_ {
        self.equations.iter()
    }

    /// Equations as a slice.
    pub fn as_slice(&self) -> &[Equation] {
        &self.equations
    }

    /// Number of equations.
    pub fn len(&self) -> usize {
        self.equations.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Mutation counter, starting at zero.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Register a callback invoked after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut() + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub(crate) fn touch(&mut self) {
        self.changed();
    }

    fn position(&self, id: EquationId) -> Option<usize> {
        self.equations.iter().position(|equation| equation.id == id)
    }

    fn modify(&mut self, id: EquationId, apply: impl FnOnce(&mut Equation)) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        apply(&mut self.equations[index]);
        self.changed();
        true
    }

    fn changed(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        for listener in &mut self.listeners {
            listener();
        }
    }
}

impl fmt::Debug for EquationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EquationStore")
            .field("equations", &self.equations)
            .field("generation", &self.generation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
