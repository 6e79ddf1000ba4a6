use log::{debug, trace};

use crate::coords::Transform;
use crate::document::values::parse_opacity;
use crate::document::{DocumentModel, MarkerRenderer, NoMarkers, RenderingHint, StyledNode, Units};
use crate::scene::{
    BoundsMapping, DrawingFragment, DrawingGroup, DrawingStack, Finisher, GeometryDrawing,
};

use super::bounds::object_bounding_box_transform;
use super::clip::map_clip;
use super::mask::map_mask;
use super::resolver::PaintTarget;
use super::Session;

/// Why a shape contributed nothing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SkipReason {
    /// Rendering hint is not `Shape`.
    NotAShape,
    /// Child of a `clipPath` while clip regions are not being rendered.
    ClipContent,
    /// `visibility: hidden|collapse` or `display: none`.
    Hidden,
    /// No geometry, or geometry without drawing segments.
    EmptyGeometry,
}

/// Terminal state of one shape's composition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShapeOutcome {
    Skipped(SkipReason),
    /// Neither fill nor stroke resolved to a paint; markers still ran.
    Unpainted,
    /// The bare leaf was inserted into the current group.
    LeafComposed,
    /// The leaf was wrapped in a group carrying clip, mask or opacity.
    GroupComposed,
}

/// Drives composition of a document into a retained drawing tree.
///
/// One composer serves one pass over one document. Composition is
/// depth-first and single-threaded: a shape is fully composed and inserted
/// before its next sibling is visited.
///
/// ```
/// use vellum_engine::compose::{ComposeOptions, Composer, Session};
/// use vellum_engine::svg::SvgDocument;
///
/// let doc = SvgDocument::parse(r#"<svg xmlns="http://www.w3.org/2000/svg">
///     <rect id="r" width="10" height="10" fill="red"/>
/// </svg>"#).unwrap();
///
/// let mut session = Session::new(ComposeOptions::default());
/// let root = Composer::new(&doc, &mut session).compose_document();
/// assert_eq!(root.leaves().len(), 1);
/// assert_eq!(root.leaves()[0].meta.name.as_deref(), Some("r"));
/// ```
pub struct Composer<'d, D: DocumentModel> {
    pub(super) document: &'d D,
    pub(super) session: &'d mut Session,
    markers: &'d dyn MarkerRenderer<D::Node<'d>>,
    /// Ids of paint servers and masks currently being composed.
    pub(super) active: Vec<String>,
    /// Nesting of mask / pattern content compositions.
    content_depth: usize,
}

impl<'d, D: DocumentModel> Composer<'d, D> {
    pub fn new(document: &'d D, session: &'d mut Session) -> Self {
        Self { document, session, markers: &NoMarkers, active: Vec::new(), content_depth: 0 }
    }

    pub fn with_markers(mut self, markers: &'d dyn MarkerRenderer<D::Node<'d>>) -> Self {
        self.markers = markers;
        self
    }

    #[inline]
    pub(super) fn doc(&self) -> &'d D {
        self.document
    }

    /// Resets the id registry and composes the whole document.
    pub fn compose_document(&mut self) -> DrawingGroup {
        self.session.reset();
        let mut stack = DrawingStack::new();
        let root = self.doc().root();
        self.compose_node(root, &mut stack);
        stack.finish()
    }

    /// Composes `node` and its subtree into `stack`.
    pub fn compose_node(&mut self, node: D::Node<'d>, stack: &mut DrawingStack) {
        match node.rendering_hint() {
            RenderingHint::Shape => {
                let outcome = self.compose_shape(node, stack);
                trace!("<{}>: {outcome:?}", node.local_name());
            }
            RenderingHint::Containers => self.compose_container(node, stack),
            RenderingHint::Clipping => {
                if self.session.options().rendering_clip_region {
                    self.compose_children(node, stack);
                }
            }
            hint => debug!("<{}>: not traversed ({hint:?})", node.local_name()),
        }
    }

    pub(super) fn compose_children(&mut self, node: D::Node<'d>, stack: &mut DrawingStack) {
        for child in node.children() {
            self.compose_node(child, stack);
        }
    }

    /// Composes the children of a mask or pattern into a detached group.
    ///
    /// Content may be composed once per use, so its ids go to a scratch
    /// registry and markers are not rendered for it.
    pub(super) fn compose_content(&mut self, node: D::Node<'d>) -> DrawingGroup {
        let outer = self.session.scratch_registry();
        self.content_depth += 1;
        let mut stack = DrawingStack::new();
        self.compose_children(node, &mut stack);
        self.content_depth -= 1;
        self.session.restore_registry(outer);
        stack.finish()
    }

    /// Pushes a group for the container's own effects, composes its
    /// children into it and closes it.
    ///
    /// Bounding-box-relative clips and masks are mapped when the group
    /// closes, from the union of the children's bounds.
    pub fn compose_container(&mut self, node: D::Node<'d>, stack: &mut DrawingStack) {
        if is_display_none(&node) {
            debug!("<{}>: display none", node.local_name());
            return;
        }

        let mut group = DrawingGroup::new();
        group.transform = node_transform(&node);
        group.opacity = node_opacity(&node);

        // An empty clip is no effect; it must not force a push.
        let mut clip_to_bounds = false;
        if let Some(clip) = self.resolve_clip(&node).filter(|c| !c.geometry.is_empty()) {
            clip_to_bounds = clip.units == Units::ObjectBoundingBox;
            group.clip = Some(clip.geometry);
        }

        let mut mask_to_bounds: Option<BoundsMapping> = None;
        if let Some(mask) = self.resolve_mask(&node) {
            if mask.units == Units::ObjectBoundingBox {
                mask_to_bounds = Some(mask.content_mapping());
            }
            group.opacity_mask = Some(mask.brush);
        }

        let finisher: Option<Finisher> = if clip_to_bounds || mask_to_bounds.is_some() {
            Some(Box::new(move |g: &mut DrawingGroup| {
                map_to_children(g, clip_to_bounds, mask_to_bounds)
            }))
        } else {
            None
        };

        let mut scope = stack.enter(group, finisher);
        self.compose_children(node, &mut scope);
    }

    /// Composes one shape node into the group on top of `stack`.
    pub fn compose_shape(&mut self, node: D::Node<'d>, stack: &mut DrawingStack) -> ShapeOutcome {
        let options = *self.session.options();

        if node.rendering_hint() != RenderingHint::Shape {
            return ShapeOutcome::Skipped(SkipReason::NotAShape);
        }
        let under_clip = node
            .parent_node()
            .is_some_and(|p| p.rendering_hint() == RenderingHint::Clipping);
        if under_clip && !options.rendering_clip_region {
            return ShapeOutcome::Skipped(SkipReason::ClipContent);
        }
        if is_hidden(&node) {
            return ShapeOutcome::Skipped(SkipReason::Hidden);
        }
        let mut geometry = match self.doc().build_geometry(&node, options.optimize_path) {
            Some(g) if !g.is_empty() => g,
            _ => return ShapeOutcome::Skipped(SkipReason::EmptyGeometry),
        };

        let mut brush = self.resolve_brush(&node, PaintTarget::Fill);
        let mut pen = self.resolve_pen(&node);
        if brush.is_none() && pen.is_none() {
            self.render_markers(&node, stack);
            return ShapeOutcome::Unpainted;
        }

        let local_bounds = geometry.local_bounds();
        let transform = node_transform(&node);
        if let Some(t) = transform {
            geometry.push_transform(t);
            if let Some(b) = brush.as_mut().filter(|b| b.transformable) {
                b.push_transform(t);
            }
            if let Some(p) = pen.as_mut().filter(|p| p.brush.transformable) {
                p.brush.push_transform(t);
            }
        }

        let leaf = GeometryDrawing::new(geometry, brush, pen);

        let mut wrapper = DrawingGroup::new();
        wrapper.opacity = node_opacity(&node);
        if let Some(clip) = self.resolve_clip(&node) {
            wrapper.clip = Some(map_clip(clip, local_bounds, transform.as_ref()));
        }
        if let Some(mask) = self.resolve_mask(&node) {
            wrapper.opacity_mask = Some(map_mask(mask, local_bounds, transform.as_ref()));
        }

        let (mut fragment, outcome) = if wrapper.is_noop() {
            (DrawingFragment::Leaf(leaf), ShapeOutcome::LeafComposed)
        } else {
            wrapper.add_child(leaf.into());
            (DrawingFragment::Group(wrapper), ShapeOutcome::GroupComposed)
        };

        self.tag(&node, &mut fragment);
        stack.add_child(fragment);
        self.render_markers(&node, stack);
        outcome
    }

    /// Attaches element identity to `fragment`.
    ///
    /// An id is attached only the first time it is seen in the session.
    fn tag(&mut self, node: &D::Node<'d>, fragment: &mut DrawingFragment) {
        let include_runtime = self.session.options().include_runtime_metadata;
        let meta = fragment.meta_mut();
        if let Some(id) = node.element_id() {
            if self.session.register_id(id) {
                meta.name = Some(id.to_owned());
                if include_runtime {
                    meta.id = Some(id.to_owned());
                }
            } else {
                debug!("id {id:?} already tagged; not tagging again");
            }
        }
        if include_runtime {
            if let Some(class) = node.element_class() {
                meta.class = Some(class.to_owned());
            }
        }
    }

    fn render_markers(&self, node: &D::Node<'d>, stack: &mut DrawingStack) {
        if self.content_depth == 0 && !node.parent_name_is("marker") {
            self.markers.render_markers(node, stack);
        }
    }

    /// Runs `f` unless `id` is already being composed further up.
    pub(super) fn guarded<T>(&mut self, id: &str, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.active.iter().any(|a| a == id) {
            log::warn!("reference cycle through #{id}; ignoring");
            return None;
        }
        self.active.push(id.to_owned());
        let out = f(self);
        self.active.pop();
        out
    }
}

fn map_to_children(group: &mut DrawingGroup, clip_to_bounds: bool, mask: Option<BoundsMapping>) {
    let Some(bounds) = group.children_bounds() else {
        return;
    };
    if clip_to_bounds {
        if let Some(clip) = group.clip.as_mut() {
            clip.push_transform(object_bounding_box_transform(bounds, None));
        }
    }
    if let (Some(mapping), Some(brush)) = (mask, group.opacity_mask.as_mut()) {
        brush.space = Some(mapping.map(bounds, None));
    }
}

pub(super) fn node_transform<N: StyledNode>(node: &N) -> Option<Transform> {
    node.attribute("transform")
        .and_then(Transform::parse)
        .filter(|t| !t.is_identity())
}

fn node_opacity<N: StyledNode>(node: &N) -> f32 {
    node.style_property("opacity").and_then(|v| parse_opacity(&v)).unwrap_or(1.0)
}

fn is_display_none<N: StyledNode>(node: &N) -> bool {
    node.style_property("display").is_some_and(|v| v.trim() == "none")
}

pub(super) fn is_hidden<N: StyledNode>(node: &N) -> bool {
    let invisible = node
        .style_property("visibility")
        .is_some_and(|v| matches!(v.trim(), "hidden" | "collapse"));
    invisible || is_display_none(node)
}
