use std::collections::{HashMap, HashSet};
use tandem_core::{ConnId, Identity, RoomId};
use thiserror::Error;

/// A room admits at most this many identities at once.
pub const ROOM_CAPACITY: usize = 2;

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum JoinError {
    #[error("identity is already in use")]
    IdentityInUse,
    #[error("room is already full")]
    RoomFull,
}

/// What a cleanup removed, so the relay can notify the rest of the room.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Departure {
    pub identity: Identity,
    pub conn: ConnId,
    pub room_id: RoomId,
}

/// In-memory identity ↔ connection ↔ room bookkeeping.
///
/// The maps are kept mutually consistent: an identity is in `active` iff it
/// has a connection mapping, and a room's occupancy equals the number of
/// identities mapped to it. All mutation goes through `try_join` and the
/// `cleanup_*` pair; callers never see the raw maps. The relay actor is the
/// single owner, which serializes the check-then-insert in `try_join`.
#[derive(Debug, Default)]
pub struct Directory {
    conn_by_identity: HashMap<Identity, ConnId>,
    identity_by_conn: HashMap<ConnId, Identity>,
    room_by_identity: HashMap<Identity, RoomId>,
    occupancy: HashMap<RoomId, usize>,
    active: HashSet<Identity>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admission check plus all four insertions as one step. A rejected join
    /// leaves the directory untouched; a request that would push a room past
    /// capacity is rejected, never queued.
    pub fn try_join(
        &mut self,
        identity: Identity,
        conn: ConnId,
        room_id: RoomId,
    ) -> Result<(), JoinError> {
        if self.active.contains(&identity) {
            return Err(JoinError::IdentityInUse);
        }

        let count = self.occupancy.get(&room_id).copied().unwrap_or(0);
        if count >= ROOM_CAPACITY {
            return Err(JoinError::RoomFull);
        }

        self.occupancy.insert(room_id.clone(), count + 1);
        self.active.insert(identity.clone());
        self.conn_by_identity.insert(identity.clone(), conn);
        self.identity_by_conn.insert(conn, identity.clone());
        self.room_by_identity.insert(identity, room_id);
        Ok(())
    }

    /// Current relay target for an identity.
    pub fn resolve(&self, identity: &Identity) -> Option<ConnId> {
        self.conn_by_identity.get(identity).copied()
    }

    /// Reverse lookup, used to stamp sender envelopes and on disconnect.
    pub fn identity_of(&self, conn: &ConnId) -> Option<&Identity> {
        self.identity_by_conn.get(conn)
    }

    pub fn is_active(&self, identity: &Identity) -> bool {
        self.active.contains(identity)
    }

    /// Occupancy of a room, 0 if the room has no entry.
    pub fn room_occupancy(&self, room_id: &RoomId) -> usize {
        self.occupancy.get(room_id).copied().unwrap_or(0)
    }

    /// Identities currently in a room, with their connections. Rooms hold at
    /// most [`ROOM_CAPACITY`] identities, so a scan of the identity→room map
    /// is as good as a dedicated index.
    pub fn occupants(&self, room_id: &RoomId) -> Vec<(Identity, ConnId)> {
        self.room_by_identity
            .iter()
            .filter(|(_, room)| *room == room_id)
            .filter_map(|(identity, _)| {
                self.conn_by_identity
                    .get(identity)
                    .map(|conn| (identity.clone(), *conn))
            })
            .collect()
    }

    /// Remove every mapping for an identity and release its room slot.
    ///
    /// Idempotent: both an explicit leave and the transport-drop path can ask
    /// for the same identity, and the second call must find nothing to do —
    /// in particular it must not decrement the room count again.
    pub fn cleanup_identity(&mut self, identity: &Identity) -> Option<Departure> {
        let conn = self.conn_by_identity.remove(identity)?;
        self.identity_by_conn.remove(&conn);
        self.active.remove(identity);

        let room_id = self.room_by_identity.remove(identity)?;
        self.release_room_slot(&room_id);

        Some(Departure {
            identity: identity.clone(),
            conn,
            room_id,
        })
    }

    /// Same as [`Self::cleanup_identity`], keyed by connection handle.
    pub fn cleanup_conn(&mut self, conn: &ConnId) -> Option<Departure> {
        let identity = self.identity_by_conn.get(conn)?.clone();
        self.cleanup_identity(&identity)
    }

    fn release_room_slot(&mut self, room_id: &RoomId) {
        let Some(count) = self.occupancy.get(room_id).copied() else {
            return;
        };
        if count <= 1 {
            // Rooms with no occupants are not retained.
            self.occupancy.remove(room_id);
        } else {
            self.occupancy.insert(room_id.clone(), count - 1);
        }
    }
}
