use arboard::Clipboard;
use macroquad::prelude::*;
use navgrid::{
    Aabb, CollisionScene, CollisionVolume, Config, EventLog, Grid, GridEvent, StaticObstacleScene,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Obstacle scene shared between the grid and the input handlers
#[derive(Clone)]
struct SharedScene(Rc<RefCell<StaticObstacleScene>>);

impl CollisionScene for SharedScene {
    fn sweep_blocked(
        &self,
        volume: &CollisionVolume,
        from: (f32, f32),
        to: (f32, f32),
        ignore: &[Aabb; 2],
    ) -> bool {
        self.0.borrow().sweep_blocked(volume, from, to, ignore)
    }
}

/// Demo state: the grid plus host-side presentation data
struct DemoState {
    grid: Grid,
    scene: Rc<RefCell<StaticObstacleScene>>,
    volume: CollisionVolume,
    range: f32,
    /// Coordinates reachable from the current selection
    reachable: HashSet<(i32, i32)>,
    show_range: bool,
    background: Color,
    event_log: Rc<RefCell<EventLog>>,
}

impl DemoState {
    fn new(config: &Config) -> Self {
        let mut grid = Grid::new(
            config.grid.width,
            config.grid.height,
            config.grid.tile_width,
            config.grid.tile_height,
        );

        let scene = Rc::new(RefCell::new(StaticObstacleScene::new()));
        grid.set_collision_scene(Box::new(SharedScene(Rc::clone(&scene))));

        let event_log = Rc::new(RefCell::new(EventLog::new()));

        // Listeners record every interaction the grid reports
        let click_log = Rc::clone(&event_log);
        grid.on_tile_clicked(move |tile| {
            click_log
                .borrow_mut()
                .log(GridEvent::TileClicked { x: tile.x, y: tile.y });
        });
        let hover_log = Rc::clone(&event_log);
        grid.on_tile_cursor_over(move |tile| {
            hover_log
                .borrow_mut()
                .log(GridEvent::HoverStart { x: tile.x, y: tile.y });
        });
        let leave_log = Rc::clone(&event_log);
        grid.on_end_tile_cursor_over(move |tile| {
            leave_log
                .borrow_mut()
                .log(GridEvent::HoverEnd { x: tile.x, y: tile.y });
        });

        DemoState {
            grid,
            scene,
            volume: CollisionVolume::new(
                config.movement.volume_radius,
                config.movement.volume_half_height,
            ),
            range: config.movement.range,
            reachable: HashSet::new(),
            show_range: config.visual.show_range,
            background: Color::from_rgba(
                config.visual.background_r,
                config.visual.background_g,
                config.visual.background_b,
                255,
            ),
            event_log,
        }
    }

    fn update_hover(&mut self, mouse_x: f32, mouse_y: f32) {
        match self.grid.tile_at_world(mouse_x, mouse_y) {
            Some(tile) => {
                let (x, y) = (tile.x, tile.y);
                self.grid.tile_cursor_over(x, y);
            }
            None => {
                // Cursor left the board entirely
                if let Some(tile) = self.grid.hovered_tile() {
                    let (x, y) = (tile.x, tile.y);
                    self.grid.end_tile_cursor_over(x, y);
                }
            }
        }
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        let coords = self
            .grid
            .tile_at_world(mouse_x, mouse_y)
            .map(|tile| (tile.x, tile.y));

        let (x, y) = match coords {
            Some(coords) => coords,
            None => return,
        };

        // Left click: toggle wall
        if is_mouse_button_pressed(MouseButton::Left) {
            self.toggle_wall(x, y);
            self.update_reachable();
        }
        // Right click: select tile
        else if is_mouse_button_pressed(MouseButton::Right) {
            self.grid.tile_clicked(x, y);
            self.update_reachable();
        }
    }

    fn toggle_wall(&mut self, x: i32, y: i32) {
        let rect = self.grid.cell_rect(x, y);
        let tile = match self.grid.get_tile_mut(x, y) {
            Some(tile) => tile,
            None => return,
        };

        if tile.is_passable() {
            tile.block();
            tile.collision = Some(rect);
            self.scene.borrow_mut().add_obstacle(rect);
            self.event_log
                .borrow_mut()
                .log(GridEvent::CostChanged { x, y, cost: None });
        } else {
            tile.unblock(1.0);
            tile.collision = None;
            self.rebuild_scene();
            self.event_log
                .borrow_mut()
                .log(GridEvent::CostChanged { x, y, cost: Some(1.0) });
        }
    }

    fn rebuild_scene(&mut self) {
        let mut scene = self.scene.borrow_mut();
        scene.clear();
        for tile in self.grid.tiles() {
            if let Some(rect) = tile.collision {
                scene.add_obstacle(rect);
            }
        }
    }

    fn resize_by(&mut self, dw: i32, dh: i32) {
        let width = (self.grid.width() + dw).max(1);
        let height = (self.grid.height() + dh).max(1);
        if let Err(e) = self.grid.resize(width, height) {
            eprintln!("Resize failed: {}", e);
            return;
        }
        self.event_log
            .borrow_mut()
            .log(GridEvent::Resize { width, height });
        // Tiles were re-addressed, collision footprints may have moved
        self.rebuild_scene();
        self.update_reachable();
    }

    fn update_reachable(&mut self) {
        self.reachable.clear();
        if let Some(selected) = self.grid.selected_tile() {
            let in_range = self
                .grid
                .tiles_in_range(selected, self.range, Some(&self.volume));
            self.reachable = in_range.iter().map(|tile| (tile.x, tile.y)).collect();
        }
    }

    fn grid_to_string(&self) -> String {
        let selected = self.grid.selected_tile().map(|tile| (tile.x, tile.y));
        let mut result = String::new();

        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let symbol = if selected == Some((x, y)) {
                    's'
                } else if !self.grid.get_tile(x, y).map_or(true, |t| t.is_passable()) {
                    '■'
                } else if self.reachable.contains(&(x, y)) {
                    'o'
                } else {
                    '□'
                };
                result.push(symbol);
            }
            result.push('\n');
        }

        result
    }

    fn copy_to_clipboard(&self) {
        let grid_string = self.grid_to_string();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&grid_string) {
                    println!("Failed to copy to clipboard: {}", e);
                } else {
                    println!("Board layout copied to clipboard!");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                println!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn draw(&self) {
        clear_background(self.background);

        let hovered = self.grid.hovered_tile().map(|tile| (tile.x, tile.y));
        let selected = self.grid.selected_tile().map(|tile| (tile.x, tile.y));
        let tile_w = self.grid.tile_width();
        let tile_h = self.grid.tile_height();

        for tile in self.grid.tiles() {
            let (px, py) = self.grid.local_position(tile.x, tile.y);

            let color = if selected == Some((tile.x, tile.y)) {
                BLUE
            } else if !tile.is_passable() {
                RED
            } else if self.show_range && self.reachable.contains(&(tile.x, tile.y)) {
                Color::from_rgba(100, 200, 100, 255)
            } else {
                Color::from_rgba(60, 60, 60, 255)
            };

            draw_rectangle(px, py, tile_w - 1.0, tile_h - 1.0, color);

            if hovered == Some((tile.x, tile.y)) {
                draw_rectangle_lines(px, py, tile_w - 1.0, tile_h - 1.0, 3.0, YELLOW);
            }
        }

        let info = format!(
            "Grid: {}x{}  Range: {}\nRight click: select tile\nLeft click: toggle wall\n+/-: resize board\nC: copy layout to clipboard\nEsc: quit",
            self.grid.width(),
            self.grid.height(),
            self.range,
        );
        draw_text(&info, 10.0, 20.0, 20.0, WHITE);
    }
}

#[macroquad::main("NavGrid - Tactical Movement Board")]
async fn main() {
    let config = Config::load();
    let mut state = DemoState::new(&config);

    loop {
        let (mouse_x, mouse_y) = mouse_position();
        state.update_hover(mouse_x, mouse_y);

        if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right)
        {
            state.handle_click(mouse_x, mouse_y);
        }

        if is_key_pressed(KeyCode::Equal) {
            state.resize_by(1, 1);
        }
        if is_key_pressed(KeyCode::Minus) {
            state.resize_by(-1, -1);
        }

        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }

    let log = state.event_log.borrow();
    println!("{}", log.summary());
    if config.logging.enable_event_log {
        if let Err(e) = log.save_to_file(&config.logging.event_log_path) {
            eprintln!("Failed to save event log: {}", e);
        } else {
            println!("Event log saved to {}", config.logging.event_log_path);
        }
    }
}
