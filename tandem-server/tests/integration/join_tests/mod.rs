mod test_duplicate_identity_rejected;
mod test_identity_released_on_disconnect;
mod test_room_full_rejected;
mod test_second_peer_notifies_incumbent;
