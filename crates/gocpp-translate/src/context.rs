//! Per-run translation state.
//!
//! One [`TranslationContext`] is created for every call to
//! [`translate`](crate::translate) and discarded afterwards. Nothing here
//! is global, so independent runs (and tests) never share counters.

use std::collections::HashSet;

use crate::error::{ConstructError, TranslateErrorKind};

/// The multi-line block currently open. Blocks never nest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    #[default]
    None,
    ImportBlock,
    VarBlock,
    ConstBlock,
    TypeBlock,
    StructBody,
    MapLiteralBlock,
}

/// Facts about identifiers collected during the single left-to-right pass.
#[derive(Debug, Default)]
pub struct SymbolFacts {
    maps: HashSet<String>,
    structs: HashSet<String>,
    /// Field names of the struct body being read, in declaration order.
    fields: Vec<String>,
}

impl SymbolFacts {
    pub fn register_map(&mut self, name: &str) {
        self.maps.insert(name.to_string());
    }

    pub fn is_map(&self, name: &str) -> bool {
        self.maps.contains(name)
    }

    /// Start collecting fields for a new struct body.
    pub fn begin_struct(&mut self, name: &str) {
        self.fields.clear();
        self.structs.insert(name.to_string());
    }

    pub fn push_field(&mut self, name: &str) {
        self.fields.push(name.to_string());
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn register_struct(&mut self, name: &str) {
        self.structs.insert(name.to_string());
    }

    /// True once any record type (and so a `String()` method) was emitted.
    pub fn has_structs(&self) -> bool {
        !self.structs.is_empty()
    }
}

/// The function whose body is being translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionFrame {
    pub name: String,
    /// C++ return type as emitted in the signature.
    pub return_type: String,
}

impl FunctionFrame {
    pub fn is_entry_point(&self) -> bool {
        self.name == "main"
    }

    pub fn returns_tuple(&self) -> bool {
        self.return_type.starts_with("std::tuple<")
    }
}

/// One open `switch` statement.
#[derive(Debug, Clone)]
pub struct SwitchFrame {
    /// Hidden temporary holding the subject, `None` for a tagless switch.
    pub subject: Option<String>,
    pub first_case: bool,
    pub seen_default: bool,
    /// Brace depth before the `switch` line.
    depth: usize,
}

/// Switch, case and fallthrough bookkeeping.
#[derive(Debug, Default)]
pub struct SwitchState {
    /// Number of switch temporaries allocated so far.
    counter: usize,
    frames: Vec<SwitchFrame>,
    pending_label: Option<String>,
    label_counter: usize,
}

impl SwitchState {
    /// Opens a switch at `depth`, allocating a hidden temporary when tagged.
    pub fn open(&mut self, tagged: bool, depth: usize) -> Option<String> {
        let subject = tagged.then(|| {
            let name = format!("_s__{}", self.counter);
            self.counter += 1;
            name
        });
        self.frames.push(SwitchFrame {
            subject: subject.clone(),
            first_case: true,
            seen_default: false,
            depth,
        });
        subject
    }

    pub fn current_mut(&mut self) -> Option<&mut SwitchFrame> {
        self.frames.last_mut()
    }

    /// Pops switches whose closing brace has been reached.
    pub fn close_finished(&mut self, depth: usize) {
        while self.frames.last().is_some_and(|f| depth <= f.depth) {
            self.frames.pop();
            self.pending_label = None;
        }
    }

    pub fn is_open(&self) -> bool {
        !self.frames.is_empty()
    }

    /// True when a line ending at `depth` closes a switch that never
    /// opened a case, so its closing brace has nothing to close.
    pub fn closes_empty(&self, depth: usize) -> bool {
        self.frames
            .last()
            .is_some_and(|f| depth <= f.depth && f.first_case)
    }

    /// True when a line starting at `depth` sits directly in a case body.
    pub fn in_case_body(&self, depth: usize) -> bool {
        self.frames.last().is_some_and(|f| depth == f.depth + 1)
    }

    /// Allocates a fresh label and records it for the next case body.
    pub fn fallthrough(&mut self) -> String {
        let label = format!("_l__{}", self.label_counter);
        self.label_counter += 1;
        self.pending_label = Some(label.clone());
        label
    }

    /// Takes the pending fallthrough label, if any.
    pub fn take_label(&mut self) -> Option<String> {
        self.pending_label.take()
    }
}

/// Right-hand side remembered inside a constant block so that bare entries
/// can repeat it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstTemplate {
    pub ty: Option<String>,
    pub expr: String,
}

/// Auto-increment (`iota`) state of the open constant block.
#[derive(Debug, Default)]
pub struct IotaState {
    /// Value of `iota` for the most recent entry.
    pub counter: i64,
    /// Set once the block's first entry has been seen.
    pub started: bool,
    pub template: Option<ConstTemplate>,
}

/// Everything the pipeline tracks while walking one unit.
#[derive(Debug, Default)]
pub struct TranslationContext {
    depth: usize,
    depth_before_line: usize,
    block: BlockKind,
    function: Option<FunctionFrame>,
    pub(crate) iota: IotaState,
    pub(crate) switch: SwitchState,
    /// Brace depth inside the open multi-line map literal.
    pub(crate) map_literal_depth: Option<usize>,
    pub(crate) symbols: SymbolFacts,
    discard_counter: usize,
}

impl TranslationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current brace depth (after the line being processed).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Brace depth before the line being processed.
    pub fn depth_before_line(&self) -> usize {
        self.depth_before_line
    }

    /// Applies one line's braces to the depth.
    pub fn track_braces(&mut self, opened: usize, closed: usize) -> Result<(), ConstructError> {
        self.depth_before_line = self.depth;
        let depth = (self.depth + opened).checked_sub(closed).ok_or_else(|| {
            ConstructError::new(
                TranslateErrorKind::UnbalancedBraces,
                "closing brace without a matching opening brace",
            )
        })?;
        self.depth = depth;
        Ok(())
    }

    pub fn block(&self) -> BlockKind {
        self.block
    }

    pub fn open_block(&mut self, kind: BlockKind) {
        tracing::debug!(?kind, depth = self.depth, "block opened");
        self.block = kind;
    }

    /// Closes the open block and clears its per-block state.
    pub fn close_block(&mut self) {
        tracing::debug!(kind = ?self.block, "block closed");
        match self.block {
            BlockKind::ConstBlock => self.iota = IotaState::default(),
            BlockKind::MapLiteralBlock => self.map_literal_depth = None,
            _ => {}
        }
        self.block = BlockKind::None;
    }

    pub fn function(&self) -> Option<&FunctionFrame> {
        self.function.as_ref()
    }

    pub fn enter_function(&mut self, name: &str, return_type: &str) {
        self.function = Some(FunctionFrame {
            name: name.to_string(),
            return_type: return_type.to_string(),
        });
    }

    pub fn leave_function(&mut self) {
        self.function = None;
    }

    pub fn symbols(&self) -> &SymbolFacts {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolFacts {
        &mut self.symbols
    }

    /// A fresh name for a discarded (`_`) binding.
    pub fn discard_name(&mut self) -> String {
        let name = format!("_d__{}", self.discard_counter);
        self.discard_counter += 1;
        name
    }
}
