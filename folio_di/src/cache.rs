use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

/// Services built by a provider, keyed by their type.
#[derive(Debug, Default)]
pub struct BuildCache {
    built: HashMap<TypeId, Box<dyn Any>>,
}

impl BuildCache {
    pub fn get_cloned<T: Clone + 'static>(&self) -> Option<T> {
        self.built
            .get(&TypeId::of::<T>())?
            .downcast_ref::<T>()
            .cloned()
    }

    pub fn insert<T: 'static>(&mut self, value: T) {
        self.built.insert(TypeId::of::<T>(), Box::new(value));
    }
}
