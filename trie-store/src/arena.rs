use std::fmt;

/// A handle to a node stored in an [`Arena`].
///
/// The index addresses a slot; the generation is bumped every time that slot is freed, so a
/// handle kept past the removal of its node no longer resolves instead of silently aliasing
/// whatever node reuses the slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Position of the slot inside the arena.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot at the time the handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

enum Slot<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32 },
}

impl<T> Slot<T> {
    fn generation(&self) -> u32 {
        match self {
            Slot::Occupied { generation, .. } | Slot::Vacant { generation } => *generation,
        }
    }
}

/// A place to store (owned) values addressed by a [`NodeId`], with holes being re-used.
/// Maintains a separate free list. A small slot map: freed slots keep their generation so that
/// stale handles can be told apart from live ones.
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    len: usize,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: vec![],
            free_list: Vec::with_capacity(16),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Default::default(),
            len: 0,
        }
    }

    /// Store `value` and return its handle.
    pub fn insert(&mut self, value: T) -> NodeId {
        let id = match self.free_list.pop() {
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot::Occupied {
                    generation: 0,
                    value,
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                let generation = slot.generation();
                *slot = Slot::Occupied { generation, value };
                NodeId { index, generation }
            }
        };
        self.len += 1;
        id
    }

    /// Free the slot behind `id`, returning what it held. Returns `None` if the handle is stale.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        let slot = &mut self.slots[id.index as usize];
        let next = Slot::Vacant {
            generation: id.generation.wrapping_add(1),
        };
        let Slot::Occupied { value, .. } = std::mem::replace(slot, next) else {
            return None;
        };
        self.free_list.push(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        matches!(
            self.slots.get(id.index as usize),
            Some(Slot::Occupied { generation, .. }) if *generation == id.generation
        )
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.index as usize)? {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.index as usize)? {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over all live values together with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied { generation, value } => Some((
                    NodeId {
                        index: index as u32,
                        generation: *generation,
                    },
                    value,
                )),
                Slot::Vacant { .. } => None,
            })
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Index<NodeId> for Arena<T> {
    type Output = T;

    /// Panics on a stale handle. Only used on handles the trie itself just obtained.
    fn index(&self, id: NodeId) -> &Self::Output {
        match self.get(id) {
            Some(value) => value,
            None => panic!("stale node handle {id}"),
        }
    }
}

impl<T> std::ops::IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("stale node handle {id}"),
        }
    }
}
