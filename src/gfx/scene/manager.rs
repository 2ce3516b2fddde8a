use log::{error, info};

use super::scene::Scene;
use crate::error::{Error, Result};

/// Upper bound on the number of scenes a manager holds.
pub const MAX_SCENES: usize = 32;

/// Ordered collection of scenes with one current scene.
///
/// Exactly one scene is active at a time once [`SceneManager::set_current`]
/// has been called; switching deactivates the previous one.
#[derive(Default)]
pub struct SceneManager {
    scenes: Vec<Scene>,
    current: Option<usize>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self {
            scenes: Vec::with_capacity(MAX_SCENES),
            current: None,
        }
    }

    /// Appends a scene. Returns its index.
    pub fn add(&mut self, scene: Scene) -> Result<usize> {
        if self.scenes.len() >= MAX_SCENES {
            error!("Scenes :: Cannot add more scenes, maximum reached");
            return Err(Error::SceneLimitReached(MAX_SCENES));
        }

        info!("Scenes :: Add Scene: {}", scene.name());
        self.scenes.push(scene);
        Ok(self.scenes.len() - 1)
    }

    /// Inserts a scene at `index`, shifting later scenes back.
    pub fn insert(&mut self, index: usize, scene: Scene) -> Result<()> {
        if self.scenes.len() >= MAX_SCENES {
            error!("Scenes :: Cannot add more scenes, maximum reached");
            return Err(Error::SceneLimitReached(MAX_SCENES));
        }
        if index > self.scenes.len() {
            error!("Scenes :: Invalid index {} for scene insertion", index);
            return Err(Error::SceneIndexOutOfRange {
                index,
                len: self.scenes.len(),
            });
        }

        info!("Scenes :: Insert Scene: {} at {}", scene.name(), index);
        self.scenes.insert(index, scene);
        if let Some(current) = self.current.as_mut() {
            if *current >= index {
                *current += 1;
            }
        }
        Ok(())
    }

    /// Makes scene `index` current: the old one is deactivated, the new one
    /// activated.
    pub fn set_current(&mut self, index: usize) -> Result<()> {
        if index >= self.scenes.len() {
            error!("Scenes :: Invalid scene index {}", index);
            return Err(Error::SceneIndexOutOfRange {
                index,
                len: self.scenes.len(),
            });
        }

        if let Some(old) = self.current_mut() {
            old.deactivate();
        }

        self.current = Some(index);
        let scene = &mut self.scenes[index];
        scene.activate();

        info!("Scenes :: Set Scene: {} ({})", scene.name(), index);
        Ok(())
    }

    /// Moves to the next scene; no-op on the last one.
    pub fn advance(&mut self) {
        let next = self.current.map_or(0, |current| current + 1);
        if next < self.scenes.len() {
            let _ = self.set_current(next);
        }
    }

    /// Moves to the previous scene; no-op on the first one.
    pub fn go_back(&mut self) {
        if let Some(current) = self.current.filter(|current| *current > 0) {
            let _ = self.set_current(current - 1);
        }
    }

    pub fn current(&self) -> Option<&Scene> {
        self.current.and_then(|index| self.scenes.get(index))
    }

    pub fn current_mut(&mut self) -> Option<&mut Scene> {
        self.current.and_then(|index| self.scenes.get_mut(index))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Scene> {
        self.scenes.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with(names: &[&str]) -> SceneManager {
        let mut manager = SceneManager::new();
        for name in names {
            manager.add(Scene::new(name)).unwrap();
        }
        manager
    }

    #[test]
    fn test_limit() {
        let mut manager = SceneManager::new();
        for i in 0..MAX_SCENES {
            assert_eq!(manager.add(Scene::new(&format!("scene {}", i))), Ok(i));
        }
        assert_eq!(
            manager.add(Scene::new("overflow")),
            Err(Error::SceneLimitReached(MAX_SCENES))
        );
        assert!(manager.insert(0, Scene::new("overflow")).is_err());
        assert_eq!(manager.len(), MAX_SCENES);
    }

    #[test]
    fn test_set_current_switches_activation() {
        let mut manager = manager_with(&["a", "b"]);
        assert!(manager.current().is_none());

        manager.set_current(0).unwrap();
        assert!(manager.get(0).unwrap().is_active());

        manager.set_current(1).unwrap();
        assert!(!manager.get(0).unwrap().is_active());
        assert!(manager.get(1).unwrap().is_current());
        assert_eq!(manager.current().map(Scene::name), Some("b"));

        assert_eq!(
            manager.set_current(9),
            Err(Error::SceneIndexOutOfRange { index: 9, len: 2 })
        );
        assert_eq!(manager.current_index(), Some(1));
    }

    #[test]
    fn test_advance_and_go_back_stop_at_ends() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.set_current(0).unwrap();

        manager.go_back();
        assert_eq!(manager.current_index(), Some(0));

        manager.advance();
        manager.advance();
        manager.advance();
        assert_eq!(manager.current_index(), Some(2));
        assert!(manager.get(2).unwrap().is_active());
        assert!(!manager.get(1).unwrap().is_active());

        manager.go_back();
        assert_eq!(manager.current().map(Scene::name), Some("b"));
    }

    #[test]
    fn test_insert_keeps_current_scene() {
        let mut manager = manager_with(&["a", "b"]);
        manager.set_current(1).unwrap();

        manager.insert(0, Scene::new("intro")).unwrap();
        assert_eq!(manager.current().map(Scene::name), Some("b"));
        assert_eq!(manager.get(0).map(Scene::name), Some("intro"));

        assert_eq!(
            manager.insert(7, Scene::new("late")),
            Err(Error::SceneIndexOutOfRange { index: 7, len: 3 })
        );
        manager.insert(3, Scene::new("outro")).unwrap();
        assert_eq!(manager.get(3).map(Scene::name), Some("outro"));
    }
}
