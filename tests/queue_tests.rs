use mlfq_queue::prelude::*;

fn cpu_queue(quantum: u64) -> Queue {
    Queue::new(QueueId::new(0), 0, quantum, QueueType::Cpu).unwrap()
}

fn long_process(name: &str) -> SimProcess {
    SimProcess::cpu_bound(name, 1_000).unwrap()
}

#[test]
fn create_queue() {
    let queue = Queue::new(QueueId::new(2), 2, 40, QueueType::Blocking).unwrap();

    assert!(queue.is_empty());
    assert_eq!(queue.priority_level(), 2);
    assert_eq!(queue.queue_type(), QueueType::Blocking);
    assert_eq!(queue.quantum(), 40);
    assert_eq!(queue.quantum_clock(), 0);
}

#[test]
fn enqueue_sets_parent_and_keeps_fifo() {
    let mut queue = cpu_queue(10);
    let mut p1 = long_process("p1");
    let mut p2 = long_process("p2");
    let mut p3 = long_process("p3");

    let id1 = queue.enqueue(&mut p1);
    let id2 = queue.enqueue(&mut p2);
    let id3 = queue.enqueue(&mut p3);

    assert_eq!(p1.parent_queue(), Some(queue.id()));
    assert_eq!(p3.parent_queue(), Some(queue.id()));
    assert!(!queue.is_empty());

    assert_eq!(queue.peek(), Some(id1));
    assert_eq!(queue.dequeue(), Some(id1));
    assert_eq!(queue.peek(), Some(id2));
    assert_eq!(queue.dequeue(), Some(id2));
    assert_eq!(queue.dequeue(), Some(id3));
    assert!(queue.is_empty());
}

#[test]
fn enqueue_twice_does_not_duplicate() {
    let mut queue = cpu_queue(10);
    let mut p = long_process("p");

    queue.enqueue(&mut p);
    queue.enqueue(&mut p);

    assert_eq!(queue.len(), 1);
}

#[test]
fn empty_queue_reads_return_none() {
    let mut queue = cpu_queue(10);

    assert_eq!(queue.peek(), None);
    assert_eq!(queue.dequeue(), None);
    assert!(queue.is_empty());
}

#[test]
fn quantum_expiry_lowers_priority_once() {
    let mut queue = cpu_queue(5);
    let mut mailbox = InterruptMailbox::new();
    let mut p = long_process("p");
    let id = queue.enqueue(&mut p);

    queue.manage_time_slice(&p, 2, &mut mailbox);
    assert_eq!(queue.quantum_clock(), 2);
    assert!(mailbox.is_empty());
    assert!(queue.contains(id));

    queue.manage_time_slice(&p, 4, &mut mailbox);
    assert_eq!(queue.quantum_clock(), 0);
    assert!(!queue.contains(id));

    let interrupts = mailbox.drain();
    assert_eq!(interrupts.len(), 1);
    assert_eq!(interrupts[0].kind, InterruptKind::LowerPriority);
    assert_eq!(interrupts[0].process, id);
    assert_eq!(interrupts[0].queue, queue.id());
}

#[test]
fn state_change_resets_clock_without_interrupt() {
    let mut queue = cpu_queue(5);
    let mut mailbox = InterruptMailbox::new();
    let mut p = SimProcess::cpu_bound("short", 4).unwrap();
    let id = queue.enqueue(&mut p);

    queue.manage_time_slice(&p, 3, &mut mailbox);
    assert_eq!(queue.quantum_clock(), 3);

    p.execute_cpu_burst(4);
    assert!(p.state_changed());

    queue.manage_time_slice(&p, 4, &mut mailbox);
    assert_eq!(queue.quantum_clock(), 0);
    assert!(mailbox.is_empty());
    assert_eq!(queue.peek(), Some(id));
}

#[test]
fn quantum_clock_stays_below_quantum() {
    let mut queue = cpu_queue(7);
    let mut table = ProcessTable::new();
    let mut mailbox = InterruptMailbox::new();

    for i in 0..4 {
        let mut p = long_process(&format!("p{}", i));
        queue.enqueue(&mut p);
        table.insert(Box::new(p));
    }

    for elapsed in [1, 3, 2, 6, 9, 1, 1, 4, 7, 2] {
        if queue.is_empty() {
            break;
        }
        queue.do_cpu_work(elapsed, &mut table, &mut mailbox).unwrap();
        assert!(queue.quantum_clock() < queue.quantum());
    }

    assert!(mailbox
        .iter()
        .all(|i| i.kind == InterruptKind::LowerPriority));
}

#[test]
fn emit_blocked_removes_from_any_position() {
    let mut queue = cpu_queue(10);
    let mut mailbox = InterruptMailbox::new();
    let mut a = long_process("a");
    let mut b = long_process("b");
    let mut c = long_process("c");
    let a_id = queue.enqueue(&mut a);
    let b_id = queue.enqueue(&mut b);
    let c_id = queue.enqueue(&mut c);

    queue.emit_interrupt(b_id, InterruptKind::ProcessBlocked, &mut mailbox);

    assert_eq!(queue.iter().collect::<Vec<_>>(), vec![a_id, c_id]);
    assert_eq!(
        mailbox.drain(),
        vec![Interrupt::new(queue.id(), b_id, InterruptKind::ProcessBlocked)]
    );
}

#[test]
fn emit_forwards_even_when_absent() {
    let mut queue = cpu_queue(10);
    let mut mailbox = InterruptMailbox::new();
    let stranger = ProcessId::new();

    queue.emit_interrupt(stranger, InterruptKind::ProcessReady, &mut mailbox);
    queue.emit_interrupt(stranger, InterruptKind::ProcessReady, &mut mailbox);

    assert_eq!(mailbox.len(), 2);
    assert!(mailbox.iter().all(|i| i.process == stranger));
}

#[test]
fn emit_lower_priority_is_not_forwarded() {
    let mut queue = cpu_queue(10);
    let mut mailbox = InterruptMailbox::new();
    let mut p = long_process("p");
    let id = queue.enqueue(&mut p);

    queue.emit_interrupt(id, InterruptKind::LowerPriority, &mut mailbox);

    assert!(mailbox.is_empty());
    assert!(queue.is_empty());
}

#[test]
fn work_on_empty_queue_fails_cleanly() {
    let mut queue = cpu_queue(10);
    let mut table = ProcessTable::new();
    let mut mailbox = InterruptMailbox::new();

    let err = queue.do_cpu_work(1, &mut table, &mut mailbox).unwrap_err();
    assert_eq!(err, SchedulerError::EmptyQueue(queue.id()));

    let err = queue.do_blocking_work(1, &mut table, &mut mailbox).unwrap_err();
    assert_eq!(err, SchedulerError::EmptyQueue(queue.id()));

    assert_eq!(queue.quantum_clock(), 0);
    assert!(mailbox.is_empty());
}

#[test]
fn work_on_unknown_process_fails() {
    let mut queue = cpu_queue(10);
    let mut table = ProcessTable::new();
    let mut mailbox = InterruptMailbox::new();
    let mut p = long_process("untracked");
    let id = queue.enqueue(&mut p);

    let err = queue.do_cpu_work(1, &mut table, &mut mailbox).unwrap_err();
    assert_eq!(err, SchedulerError::ProcessNotFound(id));
}

#[test]
fn blocking_work_readies_process() {
    let mut queue = Queue::new(QueueId::new(4), 4, 10, QueueType::Blocking).unwrap();
    let mut table = ProcessTable::new();
    let mut mailbox = InterruptMailbox::new();

    let mut p = SimProcess::new("io", vec![Burst::Cpu(1), Burst::Io(2), Burst::Cpu(1)]).unwrap();
    p.execute_cpu_burst(1);
    assert_eq!(p.state(), ProcessState::Blocked);

    let id = queue.enqueue(&mut p);
    table.insert(Box::new(p));

    queue.do_blocking_work(1, &mut table, &mut mailbox).unwrap();
    assert_eq!(queue.quantum_clock(), 1);

    queue.do_blocking_work(1, &mut table, &mut mailbox).unwrap();
    assert!(queue.is_empty());
    assert_eq!(queue.quantum_clock(), 0);
    assert_eq!(
        mailbox.drain(),
        vec![Interrupt::new(QueueId::new(4), id, InterruptKind::ProcessReady)]
    );
    assert_eq!(table.get(id).unwrap().state(), ProcessState::Ready);
}
