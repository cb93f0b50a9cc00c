use crate::tile::Tile;

/// Token returned on registration, used to unregister a listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&Tile)>;

/// Listener registry for grid interaction events
///
/// Three subscription points: click, hover-start, hover-end. Delivery is
/// synchronous and in registration order. Listeners stay registered until
/// explicitly removed.
#[derive(Default)]
pub struct GridEvents {
    next_id: u64,
    clicked: Vec<(ListenerId, Callback)>,
    cursor_over: Vec<(ListenerId, Callback)>,
    end_cursor_over: Vec<(ListenerId, Callback)>,
}

impl GridEvents {
    pub fn new() -> Self {
        GridEvents::default()
    }

    fn next_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Subscribe to tile click notifications
    pub fn on_tile_clicked<F: FnMut(&Tile) + 'static>(&mut self, callback: F) -> ListenerId {
        let id = self.next_id();
        self.clicked.push((id, Box::new(callback)));
        id
    }

    /// Subscribe to hover-start notifications
    pub fn on_tile_cursor_over<F: FnMut(&Tile) + 'static>(&mut self, callback: F) -> ListenerId {
        let id = self.next_id();
        self.cursor_over.push((id, Box::new(callback)));
        id
    }

    /// Subscribe to hover-end notifications
    pub fn on_end_tile_cursor_over<F: FnMut(&Tile) + 'static>(&mut self, callback: F) -> ListenerId {
        let id = self.next_id();
        self.end_cursor_over.push((id, Box::new(callback)));
        id
    }

    /// Remove a listener from whichever list holds it.
    /// Returns true if something was removed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let lists = [
            &mut self.clicked,
            &mut self.cursor_over,
            &mut self.end_cursor_over,
        ];
        for list in lists {
            if let Some(pos) = list.iter().position(|(entry_id, _)| *entry_id == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    pub(crate) fn emit_clicked(&mut self, tile: &Tile) {
        for (_, callback) in self.clicked.iter_mut() {
            callback(tile);
        }
    }

    pub(crate) fn emit_cursor_over(&mut self, tile: &Tile) {
        for (_, callback) in self.cursor_over.iter_mut() {
            callback(tile);
        }
    }

    pub(crate) fn emit_end_cursor_over(&mut self, tile: &Tile) {
        for (_, callback) in self.end_cursor_over.iter_mut() {
            callback(tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_delivery_in_registration_order() {
        let mut events = GridEvents::new();
        let order: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&order);
        events.on_tile_clicked(move |_| first.borrow_mut().push(1));
        let second = Rc::clone(&order);
        events.on_tile_clicked(move |_| second.borrow_mut().push(2));

        let tile = Tile::new(0, 0, 0.0, 0.0);
        events.emit_clicked(&tile);

        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_remove_listener_stops_delivery() {
        let mut events = GridEvents::new();
        let count: Rc<RefCell<i32>> = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&count);
        let id = events.on_tile_cursor_over(move |_| *counter.borrow_mut() += 1);

        let tile = Tile::new(0, 0, 0.0, 0.0);
        events.emit_cursor_over(&tile);
        assert!(events.remove_listener(id));
        events.emit_cursor_over(&tile);

        assert_eq!(*count.borrow(), 1);
        // Second removal finds nothing
        assert!(!events.remove_listener(id));
    }

    #[test]
    fn test_listener_ids_are_unique_across_lists() {
        let mut events = GridEvents::new();
        let a = events.on_tile_clicked(|_| {});
        let b = events.on_end_tile_cursor_over(|_| {});
        assert_ne!(a, b);
    }
}
