use crate::entities::Alien;
use crate::rendering::GameGrid;
use crate::settings::{FleetDirection, Settings};
use crate::types::Rect;

/// The live aliens of the current wave plus their shared heading.
pub struct Fleet {
    pub aliens: Vec<Alien>,
    pub direction: FleetDirection,
}

impl Fleet {
    pub fn new(settings: &Settings) -> Self {
        let mut fleet = Fleet {
            aliens: Vec::new(),
            direction: settings.initial_fleet_direction,
        };
        fleet.rebuild(settings);
        fleet
    }

    /// Fills the screen with rows of aliens, each one alien-width apart,
    /// leaving three alien-heights of room above the ship. The heading
    /// carries over from the previous wave.
    pub fn rebuild(&mut self, settings: &Settings) {
        self.aliens.clear();
        let (alien_width, alien_height) = Alien::size();

        let mut current_y = alien_height;
        while current_y < settings.screen_height - 3 * alien_height {
            let mut current_x = alien_width;
            while current_x < settings.screen_width - 2 * alien_width {
                self.aliens.push(Alien::new(current_x, current_y));
                current_x += 2 * alien_width;
            }
            current_y += 2 * alien_height;
        }
    }

    pub fn reset_direction(&mut self, settings: &Settings) {
        self.direction = settings.initial_fleet_direction;
    }

    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    /// Drops the fleet and turns it around if any alien touches the edge it is heading for.
    pub fn check_fleet_edges(&mut self, settings: &Settings) -> bool {
        let at_edge = self
            .aliens
            .iter()
            .any(|alien| alien.check_edges(settings, self.direction));
        if at_edge {
            self.change_fleet_direction(settings);
        }
        at_edge
    }

    fn change_fleet_direction(&mut self, settings: &Settings) {
        for alien in &mut self.aliens {
            alien.drop_by(settings.fleet_drop_speed);
        }
        self.direction = self.direction.reversed();
    }

    /// Edge check followed by one step of lockstep movement. Returns whether the fleet turned.
    pub fn update(&mut self, settings: &Settings) -> bool {
        let turned = self.check_fleet_edges(settings);
        let direction = self.direction;
        for alien in &mut self.aliens {
            alien.update(settings, direction);
        }
        turned
    }

    pub fn collides_with(&self, rect: &Rect) -> bool {
        self.aliens.iter().any(|alien| alien.rect.collides_with(rect))
    }

    pub fn reached_bottom(&self, settings: &Settings) -> bool {
        self.aliens
            .iter()
            .any(|alien| alien.rect.bottom() >= settings.screen_height)
    }

    /// Removes every alien overlapping `rect` and returns how many went.
    pub fn destroy_overlapping(&mut self, rect: &Rect) -> usize {
        let before = self.aliens.len();
        self.aliens.retain(|alien| !alien.rect.collides_with(rect));
        before - self.aliens.len()
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        for alien in &self.aliens {
            alien.draw(game_grid);
        }
    }
}

/// Number of aliens a fresh fleet holds on a `width` x `height` screen.
#[cfg(test)]
pub fn expected_fleet_size(width: i32, height: i32) -> usize {
    let (alien_width, alien_height) = Alien::size();
    let count_steps = |start: i32, limit: i32, step: i32| {
        if start >= limit { 0 } else { ((limit - start - 1) / step + 1) as usize }
    };
    let columns = count_steps(alien_width, width - 2 * alien_width, 2 * alien_width);
    let rows = count_steps(alien_height, height - 3 * alien_height, 2 * alien_height);
    columns * rows
}
