use crate::db::indices::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct BlockData {
    pub name: String,
    /// Width/height as parsed. Rotation during the search is search state
    /// and is never written back here.
    pub width: u64,
    pub height: u64,
}

#[derive(Clone, Debug)]
pub struct TerminalData {
    pub name: String,
    pub x: u64,
    pub y: u64,
}

#[derive(Clone, Debug, Default)]
pub struct NetData {
    pub blocks: Vec<BlockId>,
    pub terminals: Vec<TerminalId>,
}

impl NetData {
    pub fn degree(&self) -> usize {
        self.blocks.len() + self.terminals.len()
    }
}

/// Endpoint of a net, resolved by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinRef {
    Block(BlockId),
    Terminal(TerminalId),
}

/// In-memory design: fixed outline, blocks, terminals and connectivity.
///
/// Read-only for the duration of a floorplanning run, so it can be shared
/// across worker threads without locking.
#[derive(Clone, Debug)]
pub struct FloorplanDB {
    pub outline_width: u64,
    pub outline_height: u64,

    pub blocks: Vec<BlockData>,
    pub terminals: Vec<TerminalData>,
    pub nets: Vec<NetData>,

    pub block_name_map: HashMap<String, BlockId>,
    pub terminal_name_map: HashMap<String, TerminalId>,
}

impl FloorplanDB {
    pub fn new(outline_width: u64, outline_height: u64) -> Self {
        Self {
            outline_width,
            outline_height,
            blocks: Vec::new(),
            terminals: Vec::new(),
            nets: Vec::new(),
            block_name_map: HashMap::new(),
            terminal_name_map: HashMap::new(),
        }
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }
    pub fn num_terminals(&self) -> usize {
        self.terminals.len()
    }
    pub fn num_nets(&self) -> usize {
        self.nets.len()
    }

    pub fn outline(&self) -> (u64, u64) {
        (self.outline_width, self.outline_height)
    }

    pub fn add_block(&mut self, name: String, width: u64, height: u64) -> BlockId {
        let id = BlockId::new(self.blocks.len());
        self.blocks.push(BlockData {
            name: name.clone(),
            width,
            height,
        });
        self.block_name_map.insert(name, id);
        id
    }

    pub fn add_terminal(&mut self, name: String, x: u64, y: u64) -> TerminalId {
        let id = TerminalId::new(self.terminals.len());
        self.terminals.push(TerminalData {
            name: name.clone(),
            x,
            y,
        });
        self.terminal_name_map.insert(name, id);
        id
    }

    pub fn add_net(&mut self, net: NetData) -> NetId {
        let id = NetId::new(self.nets.len());
        self.nets.push(net);
        id
    }

    /// Resolves a net member name to a block or a terminal.
    pub fn lookup(&self, name: &str) -> Option<PinRef> {
        if let Some(&id) = self.block_name_map.get(name) {
            return Some(PinRef::Block(id));
        }
        self.terminal_name_map.get(name).map(|&id| PinRef::Terminal(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_lookup_resolves_blocks_before_terminals() {
        let mut db = FloorplanDB::new(100, 100);
        let b = db.add_block("bk1".to_string(), 10, 20);
        let t = db.add_terminal("VSS".to_string(), 0, 0);

        assert_eq!(db.lookup("bk1"), Some(PinRef::Block(b)));
        assert_eq!(db.lookup("VSS"), Some(PinRef::Terminal(t)));
        assert_eq!(db.lookup("nope"), None);
    }
}
