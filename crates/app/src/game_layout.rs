//! Layout model for the on-screen panels: a status strip over the map and a sidebar.

use taffy::prelude::*;
use taffy::{TaffyError, TaffyTree};

pub struct LayoutNodes {
    root: NodeId,
    status: NodeId,
    main_row: NodeId,
    map: NodeId,
    sidebar: NodeId,
    vitals: NodeId,
    events: NodeId,
}

#[derive(Clone, Copy)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

pub struct FrameLayout {
    pub status: PanelRect,
    pub map: PanelRect,
    pub vitals: PanelRect,
    pub events: PanelRect,
}

fn gap_below(points: f32) -> taffy::Rect<LengthPercentageAuto> {
    taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(points) }
}

pub fn setup_layout(taffy: &mut TaffyTree<()>) -> Result<LayoutNodes, TaffyError> {
    let status = taffy.new_leaf(Style {
        size: Size { width: percent(1.0), height: length(36.0) },
        margin: gap_below(16.0),
        ..Default::default()
    })?;
    let map = taffy.new_leaf(Style { flex_grow: 2.4, ..Default::default() })?;
    let vitals = taffy.new_leaf(Style {
        size: Size { width: percent(1.0), height: length(300.0) },
        margin: gap_below(16.0),
        ..Default::default()
    })?;
    let events = taffy.new_leaf(Style { flex_grow: 1.0, ..Default::default() })?;
    let sidebar = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            flex_grow: 1.0,
            margin: taffy::Rect { left: length(16.0), right: zero(), top: zero(), bottom: zero() },
            ..Default::default()
        },
        &[vitals, events],
    )?;
    let main_row = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            size: Size { width: percent(1.0), height: auto() },
            flex_grow: 1.0,
            ..Default::default()
        },
        &[map, sidebar],
    )?;
    let root = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            size: Size { width: percent(1.0), height: percent(1.0) },
            padding: taffy::Rect {
                left: length(16.0),
                right: length(16.0),
                top: length(16.0),
                bottom: length(16.0),
            },
            ..Default::default()
        },
        &[status, main_row],
    )?;
    Ok(LayoutNodes { root, status, main_row, map, sidebar, vitals, events })
}

pub fn compute_frame_layout(
    taffy: &mut TaffyTree<()>,
    nodes: &LayoutNodes,
    viewport_width: f32,
    viewport_height: f32,
) -> Result<FrameLayout, TaffyError> {
    let available = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::Definite(viewport_height),
    };
    taffy.compute_layout(nodes.root, available)?;

    let root = taffy.layout(nodes.root)?;
    let main_row = taffy.layout(nodes.main_row)?;
    let sidebar = taffy.layout(nodes.sidebar)?;

    Ok(FrameLayout {
        status: panel_rect(taffy.layout(nodes.status)?, &[root]),
        map: panel_rect(taffy.layout(nodes.map)?, &[root, main_row]),
        vitals: panel_rect(taffy.layout(nodes.vitals)?, &[root, main_row, sidebar]),
        events: panel_rect(taffy.layout(nodes.events)?, &[root, main_row, sidebar]),
    })
}

fn panel_rect(layout: &taffy::Layout, parents: &[&taffy::Layout]) -> PanelRect {
    let (x, y) = parents.iter().fold((layout.location.x, layout.location.y), |(x, y), parent| {
        (x + parent.location.x, y + parent.location.y)
    });
    PanelRect { x, y, width: layout.size.width, height: layout.size.height }
}
