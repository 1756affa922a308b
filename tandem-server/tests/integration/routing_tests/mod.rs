mod test_leave_notifies_peer;
mod test_renegotiation_routing;
mod test_toggle_roundtrip;
mod test_unknown_target_dropped;
