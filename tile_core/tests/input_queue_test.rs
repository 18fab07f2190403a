use tile_core::input::events::PointerEvent;
use tile_core::input::InputQueue;
use std::thread;

#[test]
fn test_input_queue_transmission() {
    let queue = InputQueue::new();
    let sender = queue.sender();

    let handle = thread::spawn(move || {
        sender.send(PointerEvent::down(70.0, 300.0)).unwrap();
        sender.send(PointerEvent::up(70.0, 300.0)).unwrap();
    });
    handle.join().unwrap();

    let received1 = queue.pop().expect("Should receive first event");
    assert_eq!(received1.position.x, 70.0);
    assert_eq!(received1.position.y, 300.0);
    assert!(received1.pressed);

    let received2 = queue.pop().expect("Should receive second event");
    assert!(!received2.pressed);

    assert!(queue.pop().is_none());
}

#[test]
fn test_input_queue_drain_keeps_order() {
    let queue = InputQueue::new();
    queue.push(PointerEvent::down(1.0, 1.0));
    queue.push(PointerEvent::down(2.0, 2.0));
    queue.push(PointerEvent::up(3.0, 3.0));

    let drained = queue.drain();
    let xs: Vec<f32> = drained.iter().map(|e| e.position.x).collect();
    assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    assert!(queue.drain().is_empty());
}
