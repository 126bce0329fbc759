//! Scene building
//!
//! Turns normalized points into host geometry: a translucent bounding cube,
//! three colored axis cylinders and one sphere per point, all parented under
//! a single group so the plot moves and scales as a unit.

use scattercube_algorithms::normalize;
use scattercube_core::{
    AxisDirection, CategoryColorMap, Color, Dataset, Error, Legend, NodeHandle, NormalizedPoint,
    PointId, Point3f, Record, Result, SceneHost, Shape, Vector3f,
};
use tracing::info;

use crate::config::SceneConfig;
use crate::selection::{PointPrimitive, SelectionState, SelectionStore};

/// Side length of the bounding cube
pub const CUBE_SIZE: f32 = 1.0;

/// Length of each axis indicator
pub const AXIS_LENGTH: f32 = 1.0;

/// Fixed per-axis color convention
pub fn axis_color(axis: AxisDirection) -> Color {
    match axis {
        AxisDirection::X => Color::RED,
        AxisDirection::Y => Color::GREEN,
        AxisDirection::Z => Color::BLUE,
    }
}

/// Center of the axis indicator along one of three edges meeting at the cube's
/// `(-0.5, -0.5, -0.5)` corner
pub fn axis_position(axis: AxisDirection) -> Point3f {
    let half = CUBE_SIZE / 2.0;
    let mut position = Point3f::new(-half, -half, -half);
    position[axis.index()] = 0.0;
    position
}

/// Decorative nodes of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decorations {
    pub cube: NodeHandle,
    pub axes: [NodeHandle; 3],
}

/// A built scatter plot: its host nodes and its selection store
#[derive(Debug)]
pub struct Scene {
    group: NodeHandle,
    decorations: Decorations,
    selection: SelectionStore,
    legend: Option<Legend>,
}

impl Scene {
    pub fn group(&self) -> NodeHandle {
        self.group
    }

    pub fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    /// Point primitives in record order
    pub fn points(&self) -> &[PointPrimitive] {
        self.selection.primitives()
    }

    pub fn point(&self, id: PointId) -> Option<&PointPrimitive> {
        self.selection.get(id)
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    /// The point registered under a host node
    pub fn resolve(&self, handle: NodeHandle) -> Option<PointId> {
        self.selection.resolve(handle)
    }

    pub fn highlight<H: SceneHost + ?Sized>(&mut self, host: &mut H, id: PointId) -> Result<()> {
        self.selection.highlight(host, id)
    }

    pub fn reset_all<H: SceneHost + ?Sized>(&mut self, host: &mut H) {
        self.selection.reset_all(host)
    }

    /// Move the whole plot
    pub fn reposition<H: SceneHost + ?Sized>(&self, host: &mut H, position: Point3f) {
        host.set_position(self.group, position);
    }

    /// Uniformly scale the whole plot
    pub fn rescale<H: SceneHost + ?Sized>(&self, host: &mut H, scale: f32) -> Result<()> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::Configuration(format!("Invalid scale {}", scale)));
        }
        host.set_scale(self.group, scale);
        Ok(())
    }

    /// Remove every node this scene created
    pub fn teardown<H: SceneHost + ?Sized>(self, host: &mut H) {
        let points = self.selection.into_primitives();
        for point in &points {
            host.remove(point.handle());
        }
        host.remove(self.decorations.cube);
        for axis in self.decorations.axes {
            host.remove(axis);
        }
        host.remove(self.group);
        info!(points = points.len(), "scene torn down");
    }
}

/// Builds a [`Scene`] from normalized points
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    config: SceneConfig,
    colors: CategoryColorMap,
    category_names: Option<Vec<String>>,
}

impl SceneBuilder {
    pub fn new(colors: CategoryColorMap) -> Self {
        Self {
            config: SceneConfig::default(),
            colors,
            category_names: None,
        }
    }

    pub fn with_config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    /// Names shown in the legend, indexed by category
    pub fn with_category_names(mut self, names: Vec<String>) -> Self {
        self.category_names = Some(names);
        self
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn colors(&self) -> &CategoryColorMap {
        &self.colors
    }

    /// Check everything that can fail before any node is created
    /// Returns the legend to show and each point's base color
    fn validate(&self, points: &[NormalizedPoint]) -> Result<(Option<Legend>, Vec<Color>)> {
        self.config.validate()?;

        if self.colors.uses_color(self.config.highlight_color) {
            return Err(Error::Configuration(format!(
                "Highlight color {} is also a category color",
                self.config.highlight_color
            )));
        }

        let colors = points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                self.colors.get(point.category).ok_or(Error::UnmappedCategory {
                    index,
                    category: point.category,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let legend_config = &self.config.legend;
        let legend = match &self.category_names {
            Some(names) if legend_config.enabled => {
                Legend::from_categories(legend_config.title.clone(), names, &self.colors).map(|l| {
                    Some(
                        l.with_anchor(legend_config.anchor)
                            .with_position(legend_config.position),
                    )
                })
            }
            _ => Ok(None),
        }?;
        Ok((legend, colors))
    }

    /// Emit the plot into `host`
    pub fn build<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        points: &[NormalizedPoint],
    ) -> Result<Scene> {
        let (legend, colors) = self.validate(points)?;
        let config = &self.config;

        let group = host.add_group();
        let [x, y, z] = config.group_position;
        host.set_position(group, Point3f::new(x, y, z));
        host.set_scale(group, config.group_scale);

        let cube = host.add_primitive(Shape::Box {
            size: Vector3f::repeat(CUBE_SIZE),
        });
        host.set_color(cube, config.box_color);
        host.set_alpha(cube, config.box_alpha);
        host.set_pickable(cube, false);
        host.set_parent(cube, group);

        let axes = AxisDirection::ALL.map(|axis| {
            let node = host.add_primitive(Shape::Cylinder {
                height: AXIS_LENGTH,
                radius: config.axis_thickness,
                axis,
            });
            host.set_color(node, axis_color(axis));
            host.set_position(node, axis_position(axis));
            host.set_parent(node, group);
            node
        });

        let mut primitives = Vec::with_capacity(points.len());
        for (i, (point, color)) in points.iter().zip(colors).enumerate() {
            let handle = host.add_primitive(Shape::Sphere {
                radius: config.point_radius,
            });
            host.set_position(handle, point.position);
            host.set_color(handle, color);
            host.set_parent(handle, group);
            primitives.push(PointPrimitive::new(
                PointId(i),
                handle,
                point.position,
                point.category,
                color,
            ));
        }

        if let Some(legend) = &legend {
            host.show_legend(legend);
        }

        info!(
            points = primitives.len(),
            categories = self.colors.len(),
            "built scatter scene"
        );

        Ok(Scene {
            group,
            decorations: Decorations { cube, axes },
            selection: SelectionStore::new(primitives, config.highlight_color),
            legend,
        })
    }

    /// Normalize records and build the plot
    pub fn build_from_records<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        records: &[Record],
    ) -> Result<Scene> {
        let points = normalize(records)?;
        self.build(host, &points)
    }

    /// Normalize a 3-feature dataset and build the plot, naming legend
    /// entries after the dataset's categories unless names were given
    pub fn build_from_dataset<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        dataset: &Dataset,
    ) -> Result<Scene> {
        if self.category_names.is_some() {
            return self.build_from_records(host, &dataset.records());
        }
        self.clone()
            .with_category_names(dataset.category_names().to_vec())
            .build_from_records(host, &dataset.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessHost, NodeKind};
    use approx::assert_relative_eq;
    use scattercube_core::Category;

    fn points() -> Vec<NormalizedPoint> {
        vec![
            NormalizedPoint::new(Point3f::new(-0.5, -0.5, -0.5), Category(0)),
            NormalizedPoint::new(Point3f::new(0.5, 0.5, 0.5), Category(1)),
            NormalizedPoint::new(Point3f::new(0.0, 0.0, 0.0), Category(2)),
        ]
    }

    fn builder() -> SceneBuilder {
        SceneBuilder::new(CategoryColorMap::with_default_palette(3).unwrap())
    }

    #[test]
    fn test_builds_decorations_and_points() {
        let mut host = HeadlessHost::new();
        let scene = builder().build(&mut host, &points()).unwrap();

        // group + cube + 3 axes + 3 points
        assert_eq!(host.node_count(), 8);
        assert_eq!(host.children(scene.group()).len(), 7);

        let cube = host.node(scene.decorations().cube).unwrap();
        assert!(!cube.pickable);
        assert_relative_eq!(cube.alpha, 0.1);

        for (axis, &handle) in AxisDirection::ALL.iter().zip(&scene.decorations().axes) {
            let node = host.node(handle).unwrap();
            assert_eq!(node.color, axis_color(*axis));
            assert_eq!(node.position, axis_position(*axis));
            assert!(matches!(node.kind, NodeKind::Primitive(Shape::Cylinder { axis: a, .. }) if a == *axis));
        }

        let colors: Vec<Color> = scene.points().iter().map(|p| p.base_color()).collect();
        assert_eq!(colors, vec![Color::RED, Color::GREEN, Color::BLUE]);

        let group_pos = host.world_position(scene.group()).unwrap();
        assert_relative_eq!(group_pos, Point3f::new(0.0, 1.7, 0.0));
    }

    #[test]
    fn test_axis_positions() {
        assert_eq!(axis_position(AxisDirection::X), Point3f::new(0.0, -0.5, -0.5));
        assert_eq!(axis_position(AxisDirection::Y), Point3f::new(-0.5, 0.0, -0.5));
        assert_eq!(axis_position(AxisDirection::Z), Point3f::new(-0.5, -0.5, 0.0));
    }

    #[test]
    fn test_unmapped_category_fails_before_emitting() {
        let mut host = HeadlessHost::new();
        let builder = SceneBuilder::new(CategoryColorMap::with_default_palette(2).unwrap());

        let result = builder.build(&mut host, &points());
        assert!(matches!(
            result,
            Err(Error::UnmappedCategory { index: 2, category: Category(2) })
        ));
        assert_eq!(host.node_count(), 0);
    }

    #[test]
    fn test_point_ids_follow_record_order() {
        let mut host = HeadlessHost::new();
        let builder = builder();
        let scene = builder.build(&mut host, &points()).unwrap();

        assert_eq!(scene.points().len(), 3);
        for (i, point) in scene.points().iter().enumerate() {
            assert_eq!(point.id(), PointId(i));
            assert_eq!(scene.resolve(point.handle()), Some(PointId(i)));
            assert_eq!(Some(point.base_color()), builder.colors().get(point.category()));
        }
    }

    #[test]
    fn test_highlight_color_must_be_reserved() {
        let mut host = HeadlessHost::new();
        let config = SceneConfig {
            highlight_color: Color::GREEN,
            ..SceneConfig::default()
        };
        let result = builder().with_config(config).build(&mut host, &points());
        assert!(matches!(result, Err(Error::Configuration(_))));
        assert_eq!(host.node_count(), 0);
    }

    #[test]
    fn test_legend_is_shown() {
        let mut host = HeadlessHost::new();
        let names = vec!["Setosa".to_string(), "Versicolor".to_string(), "Virginica".to_string()];
        let scene = builder()
            .with_category_names(names)
            .build(&mut host, &points())
            .unwrap();

        let legend = host.legend().unwrap();
        assert_eq!(Some(legend), scene.legend());
        assert_eq!(legend.entries[2].label, "Virginica");
        assert_eq!(legend.entries[2].color, Color::BLUE);
    }

    #[test]
    fn test_reposition_and_rescale_move_points() {
        let mut host = HeadlessHost::new();
        let scene = builder().build(&mut host, &points()).unwrap();
        let corner = scene.points()[1].handle();

        scene.reposition(&mut host, Point3f::new(1.0, 0.0, 0.0));
        scene.rescale(&mut host, 2.0).unwrap();
        assert_relative_eq!(
            host.world_position(corner).unwrap(),
            Point3f::new(2.0, 1.0, 1.0),
            epsilon = 1e-5
        );
        assert_eq!(scene.points()[1].position(), Point3f::new(0.5, 0.5, 0.5));
        assert!(scene.rescale(&mut host, 0.0).is_err());
    }

    #[test]
    fn test_teardown_removes_all_nodes() {
        let mut host = HeadlessHost::new();
        let environment = host.add_primitive(Shape::Box { size: Vector3f::repeat(10.0) });
        let scene = builder().build(&mut host, &points()).unwrap();

        scene.teardown(&mut host);
        assert_eq!(host.node_count(), 1);
        assert!(host.node(environment).is_some());
    }
}
