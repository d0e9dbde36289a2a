//! Mutation authority for the ordered layer list.
//!
//! All edits to a card's composition go through [`LayoutStore`]. Every
//! committed structural change produces a fresh snapshot of the layer list
//! and appends it to a bounded history log, so undo/redo can restore earlier
//! states without them being retroactively altered by later edits.

use crate::{
    foundation::core::Flip,
    foundation::error::{CardError, CardResult},
    layer::model::{Layer, LayerConstraints, LayerStyle, TextAlign, validate_layers},
};

/// Maximum number of retained history snapshots. Oldest entries are evicted
/// once the cap is exceeded.
pub const HISTORY_LIMIT: usize = 50;

/// Position offset applied to a duplicated layer, in canvas units.
const DUPLICATE_OFFSET: f64 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Permission mode of the editing session.
pub enum EditMode {
    /// Honors transient locks and builder-authored constraints.
    #[default]
    EndUser,
    /// Template-builder/admin surface; bypasses locks and constraints.
    Builder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Result of a lookup-based mutation.
///
/// Callers may surface a message for the non-applied cases, but the default
/// handling is a silent no-op so rapid UI interactions (dragging a locked
/// layer, a stale id from an async callback) never crash the session.
pub enum MutationOutcome {
    /// The mutation was committed and a history snapshot pushed.
    Applied,
    /// No layer with the given id exists; the document is unchanged.
    NotFound,
    /// The mutation was not applied: locked target, constraint-stripped to
    /// nothing, empty update, or an already-at-boundary reorder.
    Rejected,
}

impl MutationOutcome {
    /// Whether the mutation was committed.
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Reorder direction in render order (front = topmost = last index).
pub enum Direction {
    /// One step toward the front.
    Up,
    /// One step toward the back.
    Down,
    /// All the way to the front (topmost).
    Front,
    /// All the way to the back (bottommost).
    Back,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Partial update of a layer's top-level fields. `None` fields are preserved.
pub struct LayerUpdate {
    /// New x position.
    pub x: Option<f64>,
    /// New y position.
    pub y: Option<f64>,
    /// New user-facing label.
    pub name: Option<String>,
    /// New raw content.
    pub content: Option<String>,
    /// New visibility flag.
    pub visible: Option<bool>,
    /// New transient lock state. Setting this exempts the update from the
    /// lock check by definition.
    pub locked: Option<bool>,
    /// New width.
    pub width: Option<f64>,
    /// New height.
    pub height: Option<f64>,
    /// New rotation in degrees.
    pub rotation: Option<f64>,
    /// New mirror flags.
    pub flip: Option<Flip>,
}

impl LayerUpdate {
    /// Update that only moves the layer.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Update that only replaces the content string.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&self, layer: &mut Layer) {
        if let Some(x) = self.x {
            layer.x = x;
        }
        if let Some(y) = self.y {
            layer.y = y;
        }
        if let Some(name) = &self.name {
            layer.name = name.clone();
        }
        if let Some(content) = &self.content {
            layer.content = content.clone();
        }
        if let Some(visible) = self.visible {
            layer.visible = visible;
        }
        if let Some(locked) = self.locked {
            layer.locked = locked;
        }
        if let Some(width) = self.width {
            layer.width = Some(width);
        }
        if let Some(height) = self.height {
            layer.height = Some(height);
        }
        if let Some(rotation) = self.rotation {
            layer.rotation = Some(rotation);
        }
        if let Some(flip) = self.flip {
            layer.flip = Some(flip);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Partial update of a layer's style. `None` fields are preserved, so
/// unspecified style fields are never reset.
pub struct StyleUpdate {
    /// New font family.
    pub font: Option<String>,
    /// New font size.
    pub size: Option<f64>,
    /// New font weight.
    pub weight: Option<String>,
    /// New italic flag.
    pub italic: Option<bool>,
    /// New underline flag.
    pub underline: Option<bool>,
    /// New foreground color.
    pub color: Option<String>,
    /// New background fill color.
    pub background_color: Option<String>,
    /// New alignment.
    pub align: Option<TextAlign>,
    /// New line height.
    pub line_height: Option<f64>,
    /// New letter spacing.
    pub letter_spacing: Option<f64>,
    /// New opacity.
    pub opacity: Option<f64>,
    /// New corner radius.
    pub border_radius: Option<f64>,
    /// New uniform scale.
    pub scale: Option<f64>,
    /// New blur radius.
    pub blur: Option<f64>,
    /// New shadow descriptor.
    pub shadow: Option<String>,
    /// New gradient descriptor.
    pub gradient: Option<String>,
}

impl StyleUpdate {
    /// Update that only changes the foreground color.
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&self, style: &mut LayerStyle) {
        macro_rules! merge {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(v) = &self.$field {
                    style.$field = Some(v.clone());
                })+
            };
        }
        merge!(
            font,
            size,
            weight,
            italic,
            underline,
            color,
            background_color,
            align,
            line_height,
            letter_spacing,
            opacity,
            border_radius,
            scale,
            blur,
            shadow,
            gradient,
        );
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Partial update of builder-authored constraints.
pub struct ConstraintsUpdate {
    /// New position lock.
    pub lock_position: Option<bool>,
    /// New style lock.
    pub lock_style: Option<bool>,
    /// New content lock.
    pub lock_content: Option<bool>,
    /// New character limit.
    pub max_chars: Option<u32>,
    /// New color allow-list.
    pub allowed_colors: Option<Vec<String>>,
}

impl ConstraintsUpdate {
    fn apply(&self, constraints: &mut LayerConstraints) {
        if let Some(v) = self.lock_position {
            constraints.lock_position = v;
        }
        if let Some(v) = self.lock_style {
            constraints.lock_style = v;
        }
        if let Some(v) = self.lock_content {
            constraints.lock_content = v;
        }
        if let Some(v) = self.max_chars {
            constraints.max_chars = Some(v);
        }
        if let Some(v) = &self.allowed_colors {
            constraints.allowed_colors = Some(v.clone());
        }
    }
}

#[derive(Clone, Debug)]
/// Sole mutation authority for one editing session's layer list.
///
/// Owns the ordered layers, the current selection, the permission mode and a
/// bounded undo/redo log. Presentation collaborators read freely and compare
/// [`LayoutStore::revision`] to decide when to re-render; they never mutate
/// fields directly.
pub struct LayoutStore {
    layers: Vec<Layer>,
    selected_id: Option<String>,
    mode: EditMode,
    history: Vec<Vec<Layer>>,
    history_index: usize,
    revision: u64,
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new(EditMode::EndUser)
    }
}

impl LayoutStore {
    /// Empty store in the given permission mode.
    pub fn new(mode: EditMode) -> Self {
        Self {
            layers: Vec::new(),
            selected_id: None,
            mode,
            history: vec![Vec::new()],
            history_index: 0,
            revision: 0,
        }
    }

    /// Current layer list in render order (index 0 is bottommost).
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Currently selected layer id, if any.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// The selected layer itself.
    pub fn selected_layer(&self) -> Option<&Layer> {
        let id = self.selected_id.as_deref()?;
        self.layers.iter().find(|l| l.id == id)
    }

    /// Permission mode of this session.
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Number of retained history snapshots.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Index of the current snapshot within the history log.
    pub fn history_index(&self) -> usize {
        self.history_index
    }

    /// Monotonic change counter, bumped on every committed mutation and on
    /// selection changes. No-op mutations leave it untouched.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the entire layer list (initial load / template switch).
    ///
    /// Not a user edit: no permission check, and history is reset to a
    /// single entry holding the new list. Selection is cleared since ids
    /// from the previous document may no longer exist.
    #[tracing::instrument(skip(self, layers), fields(count = layers.len()))]
    pub fn set_layers(&mut self, layers: Vec<Layer>) -> CardResult<()> {
        validate_layers(&layers)?;
        self.layers = layers;
        self.history = vec![self.layers.clone()];
        self.history_index = 0;
        self.selected_id = None;
        self.revision += 1;
        Ok(())
    }

    /// Append a layer at the end of the list (topmost) and select it.
    ///
    /// Fails with [`CardError::DuplicateId`] if the id is already present;
    /// the existing list is left unchanged.
    pub fn add_layer(&mut self, layer: Layer) -> CardResult<()> {
        layer.validate()?;
        if self.position(&layer.id).is_some() {
            return Err(CardError::duplicate_id(layer.id));
        }
        let mut next = self.layers.clone();
        let id = layer.id.clone();
        next.push(layer);
        self.commit(next);
        self.selected_id = Some(id);
        Ok(())
    }

    /// Shallow-merge top-level fields into the layer with `id`.
    ///
    /// End-user mode honors the transient lock (unless the update itself
    /// toggles `locked`) and builder constraints: constrained portions are
    /// stripped, the remainder applies. An update stripped to nothing is a
    /// rejected no-op and pushes no history entry.
    pub fn update_layer(&mut self, id: &str, update: LayerUpdate) -> MutationOutcome {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id, "update_layer: no such layer");
            return MutationOutcome::NotFound;
        };

        let layer = &self.layers[idx];
        if self.mode == EditMode::EndUser && layer.locked && update.locked.is_none() {
            tracing::debug!(id, "update_layer: target is locked");
            return MutationOutcome::Rejected;
        }

        let mut update = update;
        if self.mode == EditMode::EndUser
            && let Some(constraints) = &layer.constraints
        {
            if constraints.lock_position {
                update.x = None;
                update.y = None;
            }
            if constraints.lock_content {
                update.content = None;
            }
            if let (Some(max), Some(content)) = (constraints.max_chars, &update.content)
                && content.chars().count() > max as usize
            {
                update.content = None;
            }
        }
        if update.is_empty() {
            tracing::debug!(id, "update_layer: nothing left to apply");
            return MutationOutcome::Rejected;
        }

        let mut next = self.layers.clone();
        update.apply(&mut next[idx]);
        self.commit(next);
        MutationOutcome::Applied
    }

    /// Shallow-merge style fields into the layer with `id`.
    ///
    /// Unspecified style fields are preserved, never reset. End-user mode
    /// honors the transient lock, `lock_style`, and the color allow-list.
    pub fn update_layer_style(&mut self, id: &str, update: StyleUpdate) -> MutationOutcome {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id, "update_layer_style: no such layer");
            return MutationOutcome::NotFound;
        };

        let layer = &self.layers[idx];
        if self.mode == EditMode::EndUser && layer.locked {
            tracing::debug!(id, "update_layer_style: target is locked");
            return MutationOutcome::Rejected;
        }

        let mut update = update;
        if self.mode == EditMode::EndUser
            && let Some(constraints) = &layer.constraints
        {
            if constraints.lock_style {
                tracing::debug!(id, "update_layer_style: style is constraint-locked");
                return MutationOutcome::Rejected;
            }
            if let (Some(allowed), Some(color)) = (&constraints.allowed_colors, &update.color)
                && !allowed.iter().any(|c| c.eq_ignore_ascii_case(color))
            {
                update.color = None;
            }
        }
        if update.is_empty() {
            return MutationOutcome::Rejected;
        }

        let mut next = self.layers.clone();
        update.apply(&mut next[idx].style);
        self.commit(next);
        MutationOutcome::Applied
    }

    /// Merge constraint fields into the layer with `id`.
    ///
    /// Constraints are authored by the builder surface only; in end-user
    /// mode this is a rejected no-op.
    pub fn update_constraints(&mut self, id: &str, update: ConstraintsUpdate) -> MutationOutcome {
        if self.mode != EditMode::Builder {
            tracing::debug!(id, "update_constraints: not in builder mode");
            return MutationOutcome::Rejected;
        }
        let Some(idx) = self.position(id) else {
            tracing::debug!(id, "update_constraints: no such layer");
            return MutationOutcome::NotFound;
        };

        let mut next = self.layers.clone();
        let constraints = next[idx].constraints.get_or_insert_with(Default::default);
        update.apply(constraints);
        self.commit(next);
        MutationOutcome::Applied
    }

    /// Remove the layer with `id`, clearing the selection if it was selected.
    pub fn delete_layer(&mut self, id: &str) -> MutationOutcome {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id, "delete_layer: no such layer");
            return MutationOutcome::NotFound;
        };
        if self.mode == EditMode::EndUser && self.layers[idx].locked {
            tracing::debug!(id, "delete_layer: target is locked");
            return MutationOutcome::Rejected;
        }

        let mut next = self.layers.clone();
        next.remove(idx);
        self.commit(next);
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        MutationOutcome::Applied
    }

    /// Clone the layer with `id` under a fresh unique id, offset by
    /// `+20/+20` canvas units, with a `" (Copy)"` name suffix. The copy is
    /// appended topmost and becomes the selection.
    pub fn duplicate_layer(&mut self, id: &str) -> MutationOutcome {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id, "duplicate_layer: no such layer");
            return MutationOutcome::NotFound;
        };

        let mut copy = self.layers[idx].clone();
        copy.id = self.fresh_copy_id(id);
        copy.name.push_str(" (Copy)");
        copy.x += DUPLICATE_OFFSET;
        copy.y += DUPLICATE_OFFSET;

        let new_id = copy.id.clone();
        let mut next = self.layers.clone();
        next.push(copy);
        self.commit(next);
        self.selected_id = Some(new_id);
        MutationOutcome::Applied
    }

    /// Move the layer one step or fully toward the front/back of the render
    /// order. Already at the boundary is a no-op.
    pub fn reorder(&mut self, id: &str, direction: Direction) -> MutationOutcome {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id, "reorder: no such layer");
            return MutationOutcome::NotFound;
        };
        if self.mode == EditMode::EndUser && self.layers[idx].locked {
            tracing::debug!(id, "reorder: target is locked");
            return MutationOutcome::Rejected;
        }

        let top = self.layers.len() - 1;
        let target = match direction {
            Direction::Up if idx < top => idx + 1,
            Direction::Down if idx > 0 => idx - 1,
            Direction::Front if idx < top => top,
            Direction::Back if idx > 0 => 0,
            _ => return MutationOutcome::Rejected,
        };

        let mut next = self.layers.clone();
        let layer = next.remove(idx);
        next.insert(target, layer);
        self.commit(next);
        MutationOutcome::Applied
    }

    /// Set or clear the selection. Does not touch history. An id not present
    /// in the document clears the selection.
    pub fn select_layer(&mut self, id: Option<&str>) {
        self.selected_id = id
            .filter(|id| self.position(id).is_some())
            .map(str::to_string);
        self.revision += 1;
    }

    /// Flip the transient lock flag. Exempt from the lock check by
    /// definition, so this succeeds regardless of the current lock state.
    pub fn toggle_lock(&mut self, id: &str) -> MutationOutcome {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id, "toggle_lock: no such layer");
            return MutationOutcome::NotFound;
        };
        let locked = self.layers[idx].locked;
        self.update_layer(
            id,
            LayerUpdate {
                locked: Some(!locked),
                ..LayerUpdate::default()
            },
        )
    }

    /// Step back one history snapshot. No-op at the oldest entry. Clears the
    /// selection on success (selection does not participate in undo state).
    pub fn undo(&mut self) -> bool {
        if self.history_index == 0 {
            return false;
        }
        self.history_index -= 1;
        self.layers = self.history[self.history_index].clone();
        self.selected_id = None;
        self.revision += 1;
        true
    }

    /// Step forward one history snapshot. No-op at the newest entry.
    pub fn redo(&mut self) -> bool {
        if self.history_index + 1 >= self.history.len() {
            return false;
        }
        self.history_index += 1;
        self.layers = self.history[self.history_index].clone();
        self.selected_id = None;
        self.revision += 1;
        true
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    fn fresh_copy_id(&self, base: &str) -> String {
        let mut candidate = format!("{base}-copy");
        let mut n = 2u64;
        while self.position(&candidate).is_some() {
            candidate = format!("{base}-copy-{n}");
            n += 1;
        }
        candidate
    }

    /// Commit a new layer list: truncate any redo tail, append the snapshot,
    /// evict the oldest entry past the retention cap.
    fn commit(&mut self, next: Vec<Layer>) {
        self.history.truncate(self.history_index + 1);
        self.history.push(next.clone());
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
        self.history_index = self.history.len() - 1;
        self.layers = next;
        self.revision += 1;
    }
}
