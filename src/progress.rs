use crate::bar::{Bar, BarStyle, TitlePosition};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::snapshot::{NodeKind, NodeView, RenderSnapshot};
use crate::terminal::Terminal;
use crate::tree::ProgressTree;

/// Draws a [`ProgressTree`] in place, one bar per node.
///
/// Each frame snapshots the tree, checks it fits the terminal, resolves
/// every group to the mean of its children and repaints the whole tree
/// from the saved cursor position.
///
/// ```rust,ignore
/// let mut term = AnsiTerminal::stdout();
/// let mut progress = TreeProgress::new();
/// progress.make_room(&mut term, &tree)?;
/// loop {
///     progress.restore(&mut term)?;
///     progress.draw(&mut term, &tree, true, true)?;
///     // ... update leaf values ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TreeProgress {
    indent: usize,
    group_style: BarStyle,
    cursor: Cursor,
}

impl Default for TreeProgress {
    fn default() -> Self {
        Self {
            indent: Self::DEFAULT_INDENT,
            group_style: BarStyle::default(),
            cursor: Cursor::new(),
        }
    }
}

impl TreeProgress {
    pub const DEFAULT_INDENT: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    /// Columns of indentation added per nesting level.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Style for group bars and unstyled leaves.
    pub fn with_group_style(mut self, style: BarStyle) -> Self {
        self.group_style = style;
        self
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn lines_required(&self, tree: &ProgressTree) -> usize {
        tree.lines_required()
    }

    /// Scrolls enough blank rows into view for `tree`, leaving the cursor
    /// where it was, so later in-place redraws stay on screen.
    pub fn make_room(&self, term: &mut dyn Terminal, tree: &ProgressTree) -> Result<()> {
        self.cursor.clear_lines(term, tree.lines_required())?;
        Ok(())
    }

    pub fn reserve_space(&self, term: &mut dyn Terminal, tree: &ProgressTree) -> Result<()> {
        self.make_room(term, tree)
    }

    /// Saves the cursor so [`TreeProgress::restore`] can return to it.
    pub fn save(&mut self, term: &mut dyn Terminal) -> Result<()> {
        self.cursor.save(term)?;
        Ok(())
    }

    /// Returns to the last saved position; does nothing before the first save.
    pub fn restore(&self, term: &mut dyn Terminal) -> Result<()> {
        self.cursor.restore(term)?;
        Ok(())
    }

    pub fn is_saved(&self) -> bool {
        self.cursor.is_saved()
    }

    /// Draws one frame of `tree`.
    ///
    /// Nothing is written unless the whole frame can be drawn: the tree is
    /// checked against the terminal height ([`Error::LengthOverflow`]) and
    /// every bar is built before the first write. `save_cursor` overwrites
    /// any earlier save.
    pub fn draw(
        &mut self, term: &mut dyn Terminal, tree: &ProgressTree, save_cursor: bool, flush: bool,
    ) -> Result<()> {
        term.measure();

        let mut snapshot = RenderSnapshot::take(tree)?;
        let required = snapshot.lines_required();
        let available = term.height();
        if required > available {
            tracing::warn!(required, available, "progress tree does not fit the terminal");
            return Err(Error::LengthOverflow {
                required,
                available,
            });
        }
        snapshot.aggregate();

        let measured: &dyn Terminal = &*term;
        let frame = snapshot
            .nodes()
            .map(|node| -> Result<(Bar, u64)> { Ok((self.bar_for(&node, measured)?, node.value())) })
            .collect::<Result<Vec<_>>>()?;

        if save_cursor {
            self.cursor.save(term)?;
        }
        for (bar, value) in &frame {
            bar.draw(term, *value, false)?;
            self.cursor.newline(term)?;
        }
        if flush {
            term.flush()?;
        }

        tracing::debug!(
            nodes = frame.len(),
            lines = required,
            height = available,
            "drew progress tree"
        );
        Ok(())
    }

    // Only a leaf's own style may retitle it or move its title; everything
    // else is titled by its key, above the bar, to match `lines_required`.
    fn bar_for(&self, node: &NodeView<'_>, term: &dyn Terminal) -> Result<Bar> {
        let mut style = match (node.kind(), node.style()) {
            (NodeKind::Leaf, Some(own)) => own.clone(),
            (_, own) => BarStyle {
                title: None,
                title_position: None,
                ..own.unwrap_or(&self.group_style).clone()
            },
        };
        if style.title.is_none() {
            style.title = Some(node.name().to_string());
        }
        style.title_position = Some(style.title_position.unwrap_or(TitlePosition::Above));
        style.indent = node.depth() * self.indent;
        Bar::new(&style, term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::WidthSpec;
    use crate::test::{Op, VirtualTerm};
    use crate::tree::BarLeaf;
    use crate::value::Value;

    fn plain() -> BarStyle {
        BarStyle::new()
            .width(WidthSpec::Columns(10))
            .force_color(Some(false))
            .fallback_chars('#', '.')
    }

    fn job(task1: &Value, task2: &Value) -> ProgressTree {
        ProgressTree::group([(
            "Job",
            ProgressTree::group([
                ("Task2", BarLeaf::new(task2.clone())),
                ("Task1", BarLeaf::new(task1.clone())),
            ]),
        )])
    }

    #[test]
    fn draws_job_with_aggregate() {
        let mut term = VirtualTerm::new(80, 24);
        let mut progress = TreeProgress::new().with_group_style(plain());
        let tree = job(&Value::new(50), &Value::new(100));
        progress.draw(&mut term, &tree, true, true).unwrap();
        assert_eq!(
            term.screen(),
            [
                "Job",
                "#######... 75/100",
                "    Task1",
                "    #####..... 50/100",
                "    Task2",
                "    ########## 100/100",
            ]
            .join("\n")
        );
        assert!(progress.is_saved());
        assert_eq!(term.ops().first(), Some(&Op::Save));
        assert_eq!(term.flushes(), 1);
    }

    #[test]
    fn redraw_overwrites_previous_frame() {
        let mut term = VirtualTerm::new(80, 24);
        let mut progress = TreeProgress::new().with_group_style(plain());
        let (t1, t2) = (Value::new(0), Value::new(0));
        let tree = job(&t1, &t2);
        progress.make_room(&mut term, &tree).unwrap();
        progress.draw(&mut term, &tree, true, true).unwrap();

        t1.set(100);
        t2.set(100);
        progress.restore(&mut term).unwrap();
        progress.draw(&mut term, &tree, true, true).unwrap();
        assert_eq!(
            term.screen(),
            [
                "Job",
                "########## 100/100",
                "    Task1",
                "    ########## 100/100",
                "    Task2",
                "    ########## 100/100",
            ]
            .join("\n")
        );
    }

    #[test]
    fn too_tall_tree_writes_nothing() {
        let mut term = VirtualTerm::new(80, 7);
        let mut progress = TreeProgress::new().with_group_style(plain());
        let tree = job(&Value::new(1), &Value::new(2));
        let before = tree.detached();

        let err = progress.draw(&mut term, &tree, true, true).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthOverflow {
                required: 8,
                available: 7
            }
        ));
        assert!(term.ops().is_empty());
        assert!(!progress.is_saved());
        assert_eq!(tree, before);
    }

    #[test]
    fn bar_errors_abort_before_output() {
        // Depth 1 indent (4) + 10c bar + " 100/100" does not fit 20 columns.
        let mut term = VirtualTerm::new(20, 24);
        let mut progress = TreeProgress::new().with_group_style(plain());
        let tree = ProgressTree::group([(
            "a",
            ProgressTree::group([("b", ProgressTree::group([("c", BarLeaf::new(Value::new(1)))]))]),
        )]);
        let err = progress.draw(&mut term, &tree, true, true).unwrap_err();
        assert!(matches!(err, Error::WidthOverflow { .. }));
        assert!(term.ops().is_empty());
    }

    #[test]
    fn leaf_style_controls_its_line() {
        let mut term = VirtualTerm::new(80, 24);
        let mut progress = TreeProgress::new().with_indent(2).with_group_style(plain());
        let tree = ProgressTree::group([(
            "Fuel",
            ProgressTree::group([(
                "Tank",
                BarLeaf::with_style(
                    Value::new(3),
                    plain()
                        .max_value(10)
                        .title_position(TitlePosition::Left)
                        .number_representation(crate::bar::NumberRepresentation::Percentage),
                ),
            )]),
        )]);
        assert_eq!(progress.lines_required(&tree), 2 + 2 + 1);
        progress.draw(&mut term, &tree, false, false).unwrap();
        assert_eq!(
            term.screen(),
            ["Fuel", ".......... 3/100", "  Tank ###.......  30%"].join("\n")
        );
        assert!(!progress.is_saved());
        assert_eq!(term.flushes(), 0);
    }

    #[test]
    fn group_style_title_never_replaces_keys() {
        let mut term = VirtualTerm::new(80, 24);
        let mut progress = TreeProgress::new().with_group_style(plain().title("Progress"));
        let tree = ProgressTree::group([(
            "Job",
            ProgressTree::group([("Task1", BarLeaf::new(Value::new(50)))]),
        )]);
        progress.draw(&mut term, &tree, true, true).unwrap();
        assert_eq!(
            term.screen(),
            ["Job", "#####..... 50/100", "    Task1", "    #####..... 50/100"].join("\n")
        );
    }

    #[test]
    fn inline_group_style_keeps_line_count() {
        let mut term = VirtualTerm::new(80, 24);
        let mut progress =
            TreeProgress::new().with_group_style(plain().title_position(TitlePosition::Left));
        let tree = ProgressTree::group([(
            "Job",
            ProgressTree::group([("Task1", BarLeaf::new(Value::new(50)))]),
        )]);
        progress.draw(&mut term, &tree, true, true).unwrap();

        let drawn = term.screen().lines().count();
        assert_eq!(drawn + 2, progress.lines_required(&tree));
        assert_eq!(term.screen().lines().nth(2), Some("    Task1"));
    }

    #[test]
    fn siblings_draw_in_key_order() {
        let mut term = VirtualTerm::new(80, 24);
        let mut progress = TreeProgress::new().with_group_style(plain());
        let tree = ProgressTree::group([
            ("b", BarLeaf::new(Value::new(0))),
            ("a", BarLeaf::new(Value::new(0))),
            ("C", BarLeaf::new(Value::new(0))),
        ]);
        progress.draw(&mut term, &tree, false, true).unwrap();
        let titles: Vec<_> = term
            .screen()
            .lines()
            .filter(|l| !l.contains('/'))
            .map(str::to_string)
            .collect();
        assert_eq!(titles, ["C", "a", "b"]);
    }

    #[test]
    fn make_room_moves_down_and_back() {
        let mut term = VirtualTerm::new(80, 24);
        let progress = TreeProgress::new();
        let tree = job(&Value::new(0), &Value::new(0));
        progress.reserve_space(&mut term, &tree).unwrap();
        assert_eq!(term.ops(), &[Op::MoveDown(8), Op::MoveUp(8)]);
        assert_eq!(term.cursor(), (0, 0));
    }

    #[test]
    fn restore_before_any_save_is_noop() {
        let mut term = VirtualTerm::new(80, 24);
        let progress = TreeProgress::new();
        progress.restore(&mut term).unwrap();
        assert!(term.ops().is_empty());
    }

    #[test]
    fn remeasures_before_each_frame() {
        let mut term = VirtualTerm::new(80, 24);
        let mut progress = TreeProgress::new().with_group_style(plain());
        let tree = job(&Value::new(0), &Value::new(0));
        progress.draw(&mut term, &tree, true, true).unwrap();

        term.resize_on_measure(80, 5);
        let err = progress.draw(&mut term, &tree, true, true).unwrap_err();
        assert!(matches!(err, Error::LengthOverflow { available: 5, .. }));
    }
}
