use pacman_rounds::events::RoundEvent;
use pacman_rounds::stage::{Ghost, GhostId, Pellet, PelletId, PowerPellet};
use pretty_assertions::assert_eq;

#[test]
fn test_pickups_convert_into_round_events() {
    let pellet = Pellet {
        id: PelletId(3),
        points: 10,
    };
    let power = PowerPellet {
        pellet: Pellet {
            id: PelletId(7),
            points: 50,
        },
        duration: 6.0,
    };
    let ghost = Ghost {
        id: GhostId(1),
        points: 200,
    };

    assert_eq!(RoundEvent::from(pellet), RoundEvent::PelletEaten(pellet));
    assert_eq!(RoundEvent::from(power), RoundEvent::PowerPelletEaten(power));
    assert_eq!(RoundEvent::from(ghost), RoundEvent::GhostEaten(ghost));
}

#[test]
fn test_round_event_equality() {
    assert_eq!(RoundEvent::PlayerCaught, RoundEvent::PlayerCaught);
    assert_ne!(RoundEvent::PlayerCaught, RoundEvent::CountdownCompleted);
    assert_ne!(RoundEvent::NewGame, RoundEvent::CountdownCompleted);
}
